use alloc::boxed::Box;

use crate::Reflect;
use crate::ops::Enumeration;
use crate::registry::FromType;

/// Type-erased [`Enumeration`] operations.
#[derive(Clone)]
pub struct TypeTraitEnum {
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    index_of: fn(&dyn Reflect) -> Option<usize>,
}

impl TypeTraitEnum {
    #[inline]
    pub fn from_index(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }

    /// The variant index of `value`, or `None` if `value` is not of this type.
    #[inline]
    pub fn index_of(&self, value: &dyn Reflect) -> Option<usize> {
        (self.index_of)(value)
    }
}

impl<T: Enumeration> FromType<T> for TypeTraitEnum {
    fn from_type() -> Self {
        Self {
            from_index: |index| {
                T::from_variant_index(index).map(|value| Box::new(value) as Box<dyn Reflect>)
            },
            index_of: |value| value.downcast_ref::<T>().map(T::variant_index),
        }
    }
}

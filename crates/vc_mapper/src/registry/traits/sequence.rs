use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::ops::Sequence;
use crate::registry::FromType;

/// Type-erased [`Sequence`] operations of a list or set type.
#[derive(Clone)]
pub struct TypeTraitSequence {
    from_items: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
    items: fn(&dyn Reflect) -> Option<Vec<&dyn Reflect>>,
}

impl TypeTraitSequence {
    /// Builds the collection, or returns `None` if an item has the wrong type.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.from_items)(items)
    }

    /// The items of `value`, or `None` if `value` is not of this type.
    #[inline]
    pub fn items<'a>(&self, value: &'a dyn Reflect) -> Option<Vec<&'a dyn Reflect>> {
        (self.items)(value)
    }
}

fn items_of<T: Sequence>(value: &dyn Reflect) -> Option<Vec<&dyn Reflect>> {
    value.downcast_ref::<T>().map(T::items)
}

impl<T: Sequence> FromType<T> for TypeTraitSequence {
    fn from_type() -> Self {
        Self {
            from_items: |items| T::from_items(items).map(|value| Box::new(value) as Box<dyn Reflect>),
            items: items_of::<T>,
        }
    }
}

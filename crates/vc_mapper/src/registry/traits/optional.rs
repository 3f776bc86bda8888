use alloc::boxed::Box;

use crate::Reflect;
use crate::ops::OptionalValue;
use crate::registry::FromType;

/// Type-erased [`OptionalValue`] operations.
#[derive(Clone)]
pub struct TypeTraitOptional {
    some: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
    none: fn() -> Box<dyn Reflect>,
    get: fn(&dyn Reflect) -> Option<Option<&dyn Reflect>>,
}

impl TypeTraitOptional {
    #[inline]
    pub fn some(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.some)(value)
    }

    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// `None` if `value` is not of this type, `Some(None)` if it is empty.
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<Option<&'a dyn Reflect>> {
        (self.get)(value)
    }
}

fn get_of<T: OptionalValue>(value: &dyn Reflect) -> Option<Option<&dyn Reflect>> {
    value.downcast_ref::<T>().map(T::get)
}

impl<T: OptionalValue> FromType<T> for TypeTraitOptional {
    fn from_type() -> Self {
        Self {
            some: |value| T::some(value).map(|value| Box::new(value) as Box<dyn Reflect>),
            none: || Box::new(T::none()),
            get: get_of::<T>,
        }
    }
}

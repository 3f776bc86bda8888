use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Reflect;
use crate::ops::Mapping;
use crate::registry::FromType;

/// Type-erased [`Mapping`] operations of a map type.
#[derive(Clone)]
pub struct TypeTraitMapping {
    from_entries: fn(Vec<(String, Box<dyn Reflect>)>) -> Option<Box<dyn Reflect>>,
    entries: fn(&dyn Reflect) -> Option<Vec<(Cow<'_, str>, &dyn Reflect)>>,
}

impl TypeTraitMapping {
    #[inline]
    pub fn from_entries(
        &self,
        entries: Vec<(String, Box<dyn Reflect>)>,
    ) -> Option<Box<dyn Reflect>> {
        (self.from_entries)(entries)
    }

    #[inline]
    pub fn entries<'a>(&self, value: &'a dyn Reflect) -> Option<Vec<(Cow<'a, str>, &'a dyn Reflect)>> {
        (self.entries)(value)
    }
}

fn entries_of<T: Mapping>(value: &dyn Reflect) -> Option<Vec<(Cow<'_, str>, &dyn Reflect)>> {
    value.downcast_ref::<T>().map(T::entries)
}

impl<T: Mapping> FromType<T> for TypeTraitMapping {
    fn from_type() -> Self {
        Self {
            from_entries: |entries| {
                T::from_entries(entries).map(|value| Box::new(value) as Box<dyn Reflect>)
            },
            entries: entries_of::<T>,
        }
    }
}

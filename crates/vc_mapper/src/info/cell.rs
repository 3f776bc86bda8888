//! Containers for static storage of type descriptors.
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so generic types key their descriptors by [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeDescriptor;
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// NonGenericDescriptorCell

/// Static storage of the descriptor of a non-generic type.
///
/// See [`Typed`](crate::info::Typed) for an example.
pub struct NonGenericDescriptorCell(OnceLock<TypeDescriptor>);

impl NonGenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Static storage of the descriptors of a generic type.
///
/// # Example
///
/// ```
/// use vc_mapper::info::{GenericDescriptorCell, TypeDescriptor, Typed};
///
/// struct Pair<T>(T, T);
///
/// impl<T: Typed> Typed for Pair<T> {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
///         CELL.get_or_insert::<Self>(|| TypeDescriptor::list::<Self, T>())
///     }
/// }
///
/// assert_eq!(<Pair<u8>>::type_descriptor().type_name(), "Pair<u8>");
/// assert_eq!(<Pair<i64>>::type_descriptor().type_name(), "Pair<i64>");
/// ```
pub struct GenericDescriptorCell(RwLock<TypeIdMap<&'static TypeDescriptor>>);

impl GenericDescriptorCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match found {
            Some(desc) => desc,
            None => {
                // Built outside the lock: `f` may resolve other generic descriptors.
                let desc = f();
                *self
                    .0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, || Box::leak(Box::new(desc)))
            }
        }
    }
}

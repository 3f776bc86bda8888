use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use crate::info::{Type, TypeDescriptor, Typed};
use crate::registry::{TypeRegistry, TypeTrait};
use crate::utils::TypeIdMap;

// -----------------------------------------------------------------------------
// TypeMeta

/// The registration record of one type: its descriptor and its type traits.
pub struct TypeMeta {
    descriptor: &'static TypeDescriptor,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// An empty record for `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            descriptor: T::type_descriptor(),
            trait_table: TypeIdMap::new(),
        }
    }

    #[inline(always)]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.descriptor.ty()
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.descriptor.type_id()
    }

    #[inline(always)]
    pub const fn type_path(&self) -> &'static str {
        self.descriptor.type_path()
    }

    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.descriptor.type_name()
    }

    /// Inserts a type trait, replacing any previous one of the same type.
    #[inline]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    pub fn remove_trait<T: TypeTrait>(&mut self) -> Option<Box<dyn TypeTrait>> {
        self.trait_table.remove(&TypeId::of::<T>())
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|data| data.deref().downcast_ref::<T>())
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut trait_table = TypeIdMap::new();
        for data in self.trait_table.values() {
            let data = data.deref().clone_type_trait();
            let any: &dyn core::any::Any = data.deref();
            trait_table.insert(any.type_id(), data);
        }
        Self {
            descriptor: self.descriptor,
            trait_table,
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("descriptor", self.descriptor)
            .field("traits", &self.trait_table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A type that can produce its [`TypeMeta`] for registration.
///
/// Implemented for the built-in types and by `#[derive(Configurable)]`.
/// [`register_dependencies`](GetTypeMeta::register_dependencies) registers
/// every type reachable from this one, so registering a root structure makes
/// its whole type graph available to the mapper.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so it cannot be registered for mapping",
    note = "consider annotating `{Self}` with `#[derive(Configurable)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    #[inline(always)]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

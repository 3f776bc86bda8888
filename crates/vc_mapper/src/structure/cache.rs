use alloc::string::ToString;
use alloc::sync::Arc;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::MapperError;
use crate::diagnostics::MappingPath;
use crate::info::TypeDescriptor;
use crate::registry::{TypeRegistry, TypeTraitStructure};
use crate::structure::{StructureDescriptor, discover};
use crate::utils::TypeIdMap;

/// Memoized [`StructureDescriptor`]s, keyed by type.
///
/// A descriptor is discovered at most once per cache under normal use: the
/// first one inserted for a type is kept, and every lookup returns that same
/// `Arc`. Readers never observe a partially built descriptor.
#[derive(Default)]
pub struct StructureCache {
    entries: RwLock<TypeIdMap<Arc<StructureDescriptor>>>,
}

impl StructureCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns the descriptor of `ty`, discovering it on first use.
    ///
    /// # Errors
    ///
    /// - [`MapperError::UnregisteredType`] if `ty` is not in `registry`.
    /// - [`MapperError::Unmappable`] if `ty` has no schema, or a schema
    ///   without any constructor.
    /// - Any error of [`discover`].
    pub fn get_or_discover(
        &self,
        registry: &TypeRegistry,
        ty: &'static TypeDescriptor,
        path: &MappingPath,
    ) -> Result<Arc<StructureDescriptor>, MapperError> {
        let type_id = ty.type_id();

        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(descriptor) = cached {
            return Ok(descriptor);
        }

        let Some(type_meta) = registry.get(type_id) else {
            return Err(MapperError::UnregisteredType {
                ty: ty.type_path(),
                path: path.to_string(),
            });
        };
        let Some(type_trait) = type_meta.get_trait::<TypeTraitStructure>() else {
            return Err(MapperError::Unmappable {
                ty: ty.type_path(),
                path: path.to_string(),
                reason: "no structure schema is registered",
            });
        };
        let Some(descriptor) = discover(type_trait.schema())? else {
            return Err(MapperError::Unmappable {
                ty: ty.type_path(),
                path: path.to_string(),
                reason: "the schema has neither a constructor nor a zero-argument constructor",
            });
        };

        // Discovery ran without the lock; a concurrent winner is kept.
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get_or_insert(type_id, || Arc::new(descriptor));
        Ok(Arc::clone(entry))
    }
}

impl fmt::Debug for StructureCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::StructureCache;
    use crate::MapperError;
    use crate::diagnostics::MappingPath;
    use crate::info::Typed;
    use crate::registry::TypeRegistry;

    #[derive(Debug)]
    struct Opaque;

    crate::impl_custom_scalar!(Opaque);

    #[test]
    fn errors_name_the_type() {
        let cache = StructureCache::new();
        let path = MappingPath::root().field("inner");

        let error = cache
            .get_or_discover(&TypeRegistry::empty(), Opaque::type_descriptor(), &path)
            .unwrap_err();
        assert!(matches!(error, MapperError::UnregisteredType { ref path, .. } if path == "inner"));

        let mut registry = TypeRegistry::empty();
        registry.register::<Opaque>();
        let error = cache
            .get_or_discover(&registry, Opaque::type_descriptor(), &path)
            .unwrap_err();
        assert!(matches!(error, MapperError::Unmappable { .. }));
        assert_eq!(cache.len(), 0);
    }
}

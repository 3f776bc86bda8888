use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bigdecimal::BigDecimal;
use hashbrown::{HashMap, HashSet};
use num_bigint::BigInt;

use crate::info::Typed;
use crate::raw::RawValue;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};
use crate::utils::{FixedHashState, TypeIdMap};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of target types and their [`TypeMeta`].
///
/// The mapper looks up a type's behaviour here by [`TypeId`]. Registering a
/// type also registers its dependencies, so one call per root type is enough.
///
/// # Example
///
/// ```
/// use std::any::TypeId;
/// use vc_mapper::registry::{TypeRegistry, TypeTraitSequence};
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Option<String>>>();
///
/// assert!(registry.contains(TypeId::of::<Option<String>>()));
/// assert!(registry
///     .get_type_trait::<TypeTraitSequence>(TypeId::of::<Vec<Option<String>>>())
///     .is_some());
/// assert!(registry.get_with_type_name("Vec<Option<String>>").is_some());
/// ```
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    names: NameIndex,
}

/// Lookup of registered types by full path and by short name.
///
/// A short name claimed by two types is moved to `ambiguous` and stays
/// unresolvable from then on.
struct NameIndex {
    by_path: HashMap<&'static str, TypeId, FixedHashState>,
    by_name: HashMap<&'static str, TypeId, FixedHashState>,
    ambiguous: HashSet<&'static str, FixedHashState>,
}

impl NameIndex {
    const fn new() -> Self {
        Self {
            by_path: HashMap::with_hasher(FixedHashState),
            by_name: HashMap::with_hasher(FixedHashState),
            ambiguous: HashSet::with_hasher(FixedHashState),
        }
    }

    fn add(&mut self, type_meta: &TypeMeta) {
        let ty = type_meta.ty();
        self.by_path.insert(ty.path(), ty.id());

        let name = ty.name();
        if self.ambiguous.contains(name) {
            return;
        }
        if self.by_name.remove(name).is_some() {
            log::debug!("short type name `{name}` is ambiguous");
            self.ambiguous.insert(name);
        } else {
            self.by_name.insert(name, ty.id());
        }
    }
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! register_all {
    ($registry:ident: $($ty:ty),* $(,)?) => {
        $($registry.register::<$ty>();)*
    };
}

impl TypeRegistry {
    /// A registry without any types.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            names: NameIndex::new(),
        }
    }

    /// A registry with every built-in scalar type.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_all!(registry:
            bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
            String, BigInt, BigDecimal, RawValue,
        );
        registry
    }

    // Returns `true` if the type was not registered before.
    fn insert_with(&mut self, type_id: TypeId, make: impl FnOnce() -> TypeMeta) -> bool {
        let names = &mut self.names;
        self.type_meta_table.try_insert(type_id, || {
            let type_meta = make();
            names.add(&type_meta);
            type_meta
        })
    }

    /// Registers `T` and, the first time, its dependencies.
    ///
    /// Registering an already registered type does nothing.
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.insert_with(TypeId::of::<T>(), T::get_type_meta) {
            log::trace!("registered `{}`", core::any::type_name::<T>());
            T::register_dependencies(self);
        }
    }

    /// Inserts `type_meta` unless its type is already registered.
    ///
    /// Returns `true` if it was inserted. Dependencies are not registered.
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.insert_with(type_meta.type_id(), || type_meta)
    }

    /// Registers every type annotated with `#[config(auto_register)]`.
    ///
    /// Returns `true` if automatic registration is supported by the current
    /// platform. Repeated calls are cheap.
    ///
    /// Requires the `auto_register` feature, otherwise does nothing and returns `false`.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_types(self);
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Adds the type trait `D` to the already registered type `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => type_meta.insert_trait(D::from_type()),
            None => panic!(
                "Called `TypeRegistry::register_type_trait`, but the type `{}` of type trait `{}` is not registered",
                core::any::type_name::<T>(),
                core::any::type_name::<D>(),
            ),
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        self.names.by_path.get(type_path).and_then(|id| self.get(*id))
    }

    /// Looks up a type by its short name.
    ///
    /// Names shared by several registered types are not resolvable this way.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        self.names.by_name.get(type_name).and_then(|id| self.get(*id))
    }

    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.names.ambiguous.contains(type_name)
    }

    #[inline]
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        self.get(type_id).and_then(TypeMeta::get_trait::<T>)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names.by_path.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

/// A shareable [`TypeRegistry`] behind a read-write lock.
///
/// Lock poisoning is ignored: the registry is only ever extended, so a
/// panic while holding the lock leaves it usable.
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::registry::{TypeTraitMapping, TypeTraitOptional, TypeTraitSequence};
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    #[test]
    fn new_contains_scalars() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.contains(TypeId::of::<f64>()));
        assert!(registry.get_with_type_path("alloc::string::String").is_some());
        assert!(registry.get_with_type_name("i32").is_some());
    }

    #[test]
    fn register_pulls_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<BTreeMap<String, Option<Vec<u8>>>>();

        assert!(registry.contains(TypeId::of::<String>()));
        assert!(registry.contains(TypeId::of::<Vec<u8>>()));
        assert!(registry.contains(TypeId::of::<u8>()));

        let map = TypeId::of::<BTreeMap<String, Option<Vec<u8>>>>();
        assert!(registry.get_type_trait::<TypeTraitMapping>(map).is_some());
        assert!(registry
            .get_type_trait::<TypeTraitOptional>(TypeId::of::<Option<Vec<u8>>>())
            .is_some());
        assert!(registry.get_type_trait::<TypeTraitSequence>(map).is_none());
    }

    #[test]
    fn register_twice_keeps_one_entry() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<i32>>();
        let len = registry.len();
        registry.register::<Vec<i32>>();
        assert_eq!(registry.len(), len);
    }

    #[test]
    fn short_name_collisions_become_ambiguous() {
        mod a {
            #[derive(Debug)]
            pub struct Same;
            crate::impl_custom_scalar!(Same);
        }
        mod b {
            #[derive(Debug)]
            pub struct Same;
            crate::impl_custom_scalar!(Same);
        }

        let mut registry = TypeRegistry::empty();
        registry.register::<a::Same>();
        registry.register::<b::Same>();

        assert!(registry.get_with_type_name("Same").is_none());
        assert!(registry.is_ambiguous("Same"));
        assert_eq!(registry.len(), 2);
    }
}

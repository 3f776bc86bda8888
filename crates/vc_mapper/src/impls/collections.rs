use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::{BuildHasher, Hash};
use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};

use crate::Reflect;
use crate::info::{GenericDescriptorCell, TypeDescriptor, Typed};
use crate::ops::MapKey;
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeRegistry};
use crate::registry::{TypeTraitMapping, TypeTraitSequence};

// -----------------------------------------------------------------------------
// Lists and sets

macro_rules! impl_sequence {
    ($kind:ident, $ty:ident < T $(, $s:ident)? > where $($bound:tt)*) => {
        impl<T: Typed $(, $s: 'static)?> Typed for $ty<T $(, $s)?> {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| TypeDescriptor::$kind::<Self, T>())
            }
        }

        impl<T $(, $s)?> GetTypeMeta for $ty<T $(, $s)?>
        where
            T: GetTypeMeta + Reflect,
            $($bound)*
        {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait::<TypeTraitSequence>(FromType::<Self>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<T>();
            }
        }
    };
}

impl_sequence!(list, Vec<T> where);
impl_sequence!(set, BTreeSet<T> where T: Ord);
impl_sequence!(set, HashSet<T, S> where T: Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static);
impl_sequence!(set, IndexSet<T, S> where T: Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static);

// -----------------------------------------------------------------------------
// Maps

macro_rules! impl_mapping {
    ($ty:ident < K, V $(, $s:ident)? > where $($bound:tt)*) => {
        impl<K: Typed, V: Typed $(, $s: 'static)?> Typed for $ty<K, V $(, $s)?> {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| TypeDescriptor::map::<Self, K, V>())
            }
        }

        impl<K, V $(, $s)?> GetTypeMeta for $ty<K, V $(, $s)?>
        where
            K: GetTypeMeta + MapKey + Send + Sync + Debug,
            V: GetTypeMeta + Reflect,
            $($bound)*
        {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait::<TypeTraitMapping>(FromType::<Self>::from_type());
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_mapping!(BTreeMap<K, V> where K: Ord);
impl_mapping!(HashMap<K, V, S> where K: Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static);
impl_mapping!(IndexMap<K, V, S> where K: Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypeKind, Typed};
    use crate::registry::{FromType, TypeTraitMapping, TypeTraitSequence};
    use alloc::borrow::Cow;
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use indexmap::{IndexMap, IndexSet};
    use std::collections::HashSet;

    #[test]
    fn set_descriptors() {
        assert!(matches!(<HashSet<u8>>::type_descriptor().kind(), TypeKind::Set(_)));
        assert!(matches!(<IndexSet<String>>::type_descriptor().kind(), TypeKind::Set(_)));
        assert!(matches!(<Vec<u8>>::type_descriptor().kind(), TypeKind::List(_)));
    }

    #[test]
    fn sequence_trait_builds_and_reads() {
        let sequence: TypeTraitSequence = FromType::<Vec<i32>>::from_type();
        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_i32), Box::new(2_i32)];
        let built = sequence.from_items(items).unwrap();
        assert_eq!(built.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2]));

        let read = sequence.items(&*built).unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[1].downcast_ref::<i32>(), Some(&2));

        let wrong: Vec<Box<dyn Reflect>> = vec![Box::new(1_i64)];
        assert!(sequence.from_items(wrong).is_none());
    }

    #[test]
    fn mapping_trait_keeps_order() {
        let mapping: TypeTraitMapping = FromType::<IndexMap<String, u8>>::from_type();
        let entries: Vec<(String, Box<dyn Reflect>)> = vec![
            ("b".into(), Box::new(2_u8)),
            ("a".into(), Box::new(1_u8)),
        ];
        let built = mapping.from_entries(entries).unwrap();
        let read = mapping.entries(&*built).unwrap();
        let keys: Vec<Cow<'_, str>> = read.into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn integer_keys_parse() {
        let mapping: TypeTraitMapping = FromType::<BTreeMap<u32, String>>::from_type();
        let ok: Vec<(String, Box<dyn Reflect>)> = vec![("7".into(), Box::new(String::from("x")))];
        let built = mapping.from_entries(ok).unwrap();
        assert_eq!(
            built.downcast_ref::<BTreeMap<u32, String>>().unwrap().get(&7).map(String::as_str),
            Some("x")
        );

        let bad: Vec<(String, Box<dyn Reflect>)> = vec![("x".into(), Box::new(String::new()))];
        assert!(mapping.from_entries(bad).is_none());
    }
}

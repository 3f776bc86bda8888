use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::Reflect;
use crate::info::Typed;

// -----------------------------------------------------------------------------
// MapKey

/// A type usable as the key of a [`Mapping`].
///
/// The mapper itself only accepts maps whose key descriptor is `String`.
/// Other key types can still be declared; the mapper rejects them with
/// [`MapperError::NonStringMapKey`](crate::MapperError::NonStringMapKey)
/// when such a map is converted or exported.
pub trait MapKey: Typed + Sized {
    fn from_key(key: &str) -> Option<Self>;

    fn to_key(&self) -> Cow<'_, str>;
}

impl MapKey for String {
    #[inline]
    fn from_key(key: &str) -> Option<Self> {
        Some(key.into())
    }

    #[inline]
    fn to_key(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

macro_rules! impl_int_map_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                #[inline]
                fn from_key(key: &str) -> Option<Self> {
                    key.parse().ok()
                }

                #[inline]
                fn to_key(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_int_map_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// -----------------------------------------------------------------------------
// Mapping

/// A map built from, and iterated as, string keys with type-erased values.
///
/// `from_entries` returns `None` if a key cannot be parsed or a value is not
/// of the value type.
pub trait Mapping: Reflect + Sized {
    fn from_entries(entries: Vec<(String, Box<dyn Reflect>)>) -> Option<Self>;

    fn entries(&self) -> Vec<(Cow<'_, str>, &dyn Reflect)>;
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: MapKey + Ord + Send + Sync,
    V: Reflect,
    BTreeMap<K, V>: Reflect,
{
    fn from_entries(entries: Vec<(String, Box<dyn Reflect>)>) -> Option<Self> {
        entries
            .into_iter()
            .map(|(key, value)| Some((K::from_key(&key)?, value.take::<V>().ok()?)))
            .collect()
    }

    fn entries(&self) -> Vec<(Cow<'_, str>, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.to_key(), value as &dyn Reflect))
            .collect()
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash + Send + Sync,
    V: Reflect,
    S: BuildHasher + Default + Send + Sync + 'static,
    HashMap<K, V, S>: Reflect,
{
    fn from_entries(entries: Vec<(String, Box<dyn Reflect>)>) -> Option<Self> {
        entries
            .into_iter()
            .map(|(key, value)| Some((K::from_key(&key)?, value.take::<V>().ok()?)))
            .collect()
    }

    fn entries(&self) -> Vec<(Cow<'_, str>, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.to_key(), value as &dyn Reflect))
            .collect()
    }
}

impl<K, V, S> Mapping for IndexMap<K, V, S>
where
    K: MapKey + Eq + Hash + Send + Sync,
    V: Reflect,
    S: BuildHasher + Default + Send + Sync + 'static,
    IndexMap<K, V, S>: Reflect,
{
    fn from_entries(entries: Vec<(String, Box<dyn Reflect>)>) -> Option<Self> {
        entries
            .into_iter()
            .map(|(key, value)| Some((K::from_key(&key)?, value.take::<V>().ok()?)))
            .collect()
    }

    fn entries(&self) -> Vec<(Cow<'_, str>, &dyn Reflect)> {
        self.iter()
            .map(|(key, value)| (key.to_key(), value as &dyn Reflect))
            .collect()
    }
}

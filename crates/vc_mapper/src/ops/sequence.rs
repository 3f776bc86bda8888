use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use indexmap::IndexSet;

use crate::Reflect;

/// A homogeneous collection built from, and iterated as, type-erased items.
///
/// `from_items` returns `None` if an item is not of the element type.
pub trait Sequence: Reflect + Sized {
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self>;

    fn items(&self) -> Vec<&dyn Reflect>;
}

impl<T: Reflect> Sequence for Vec<T>
where
    Vec<T>: Reflect,
{
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self> {
        items.into_iter().map(|item| item.take::<T>().ok()).collect()
    }

    fn items(&self) -> Vec<&dyn Reflect> {
        self.iter().map(|item| item as &dyn Reflect).collect()
    }
}

impl<T: Reflect + Ord> Sequence for BTreeSet<T>
where
    BTreeSet<T>: Reflect,
{
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self> {
        items.into_iter().map(|item| item.take::<T>().ok()).collect()
    }

    fn items(&self) -> Vec<&dyn Reflect> {
        self.iter().map(|item| item as &dyn Reflect).collect()
    }
}

impl<T, S> Sequence for HashSet<T, S>
where
    T: Reflect + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
    HashSet<T, S>: Reflect,
{
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self> {
        items.into_iter().map(|item| item.take::<T>().ok()).collect()
    }

    fn items(&self) -> Vec<&dyn Reflect> {
        self.iter().map(|item| item as &dyn Reflect).collect()
    }
}

impl<T, S> Sequence for IndexSet<T, S>
where
    T: Reflect + Eq + Hash,
    S: BuildHasher + Default + Send + Sync + 'static,
    IndexSet<T, S>: Reflect,
{
    fn from_items(items: Vec<Box<dyn Reflect>>) -> Option<Self> {
        items.into_iter().map(|item| item.take::<T>().ok()).collect()
    }

    fn items(&self) -> Vec<&dyn Reflect> {
        self.iter().map(|item| item as &dyn Reflect).collect()
    }
}

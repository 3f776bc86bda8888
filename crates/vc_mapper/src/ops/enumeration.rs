use crate::Reflect;

/// A unit-only enum addressed by variant index.
///
/// The index is the position of the variant's canonical name in the type's
/// [`EnumInfo`](crate::info::EnumInfo). Implemented by
/// `#[derive(Configurable)]` on enums.
pub trait Enumeration: Reflect + Sized {
    fn from_variant_index(index: usize) -> Option<Self>;

    fn variant_index(&self) -> usize;
}

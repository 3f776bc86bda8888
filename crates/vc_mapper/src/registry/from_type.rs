/// Builds a [`TypeTrait`](crate::registry::TypeTrait) for the type `T`.
///
/// # Example
///
/// ```
/// use vc_mapper::registry::{FromType, TypeMeta, TypeTraitSequence};
///
/// let mut meta = TypeMeta::of::<Vec<u8>>();
/// meta.insert_trait::<TypeTraitSequence>(FromType::<Vec<u8>>::from_type());
///
/// assert!(meta.has_trait::<TypeTraitSequence>());
/// ```
pub trait FromType<T> {
    fn from_type() -> Self;
}

use crate::info::TypeDescriptor;

/// A type with a static [`TypeDescriptor`].
///
/// Implemented for the supported standard and third-party types, and by
/// `#[derive(Configurable)]`. Manual implementations store the descriptor in a
/// [`NonGenericDescriptorCell`] or, for generic types, a
/// [`GenericDescriptorCell`].
///
/// # Example
///
/// ```
/// use vc_mapper::info::{NonGenericDescriptorCell, ScalarKind, TypeDescriptor, Typed};
///
/// #[derive(Debug)]
/// struct Color(u32);
///
/// impl Typed for Color {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::scalar::<Self>(ScalarKind::Custom))
///     }
/// }
///
/// assert_eq!(Color::type_descriptor().type_name(), "Color");
/// ```
///
/// [`NonGenericDescriptorCell`]: crate::info::NonGenericDescriptorCell
/// [`GenericDescriptorCell`]: crate::info::GenericDescriptorCell
pub trait Typed: 'static {
    fn type_descriptor() -> &'static TypeDescriptor;
}

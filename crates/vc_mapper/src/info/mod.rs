//! Static descriptions of target types.
//!
//! ## Menu
//!
//! - [`Type`]: a [`TypeId`] plus the full and the short type path.
//! - [`TypeDescriptor`]: a resolved, generics-aware description of a target type,
//!   made of a [`Type`] and a [`TypeKind`].
//! - [`TypeKind`]: one of `Scalar`, `List`, `Set`, `Map`, `Optional` and `Struct`.
//!   Nested kinds hold lazy pointers to the descriptors of their type arguments.
//! - [`ScalarKind`]: which leaf family a scalar belongs to, including [`EnumInfo`].
//! - [`Typed`]: the trait providing a type's `&'static TypeDescriptor`.
//! - [`NonGenericDescriptorCell`] and [`GenericDescriptorCell`]: static storage
//!   used to implement [`Typed`].
//!
//! Descriptors are pure data. Behaviour such as building a `Vec<T>` from
//! converted items lives in the [registry](crate::registry).
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod descriptor;
mod scalar;
mod ty;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericDescriptorCell, NonGenericDescriptorCell};
pub use descriptor::{DescriptorFn, TypeDescriptor, TypeKind};
pub use scalar::{EnumInfo, ScalarKind};
pub use ty::Type;
pub use typed::Typed;

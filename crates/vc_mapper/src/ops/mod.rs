//! Typed access to container-like values.
//!
//! These traits describe how a concrete Rust type is assembled from, and
//! decomposed into, type-erased parts. The registry wraps them into
//! [type traits](crate::registry) so the mapper can use them knowing only a
//! [`TypeId`](core::any::TypeId).
//!
//! - [`Sequence`]: lists and sets.
//! - [`Mapping`] and [`MapKey`]: string-keyed maps.
//! - [`OptionalValue`]: `Option<T>`.
//! - [`Enumeration`]: unit-only enums, implemented by `#[derive(Configurable)]`.

// -----------------------------------------------------------------------------
// Modules

mod enumeration;
mod mapping;
mod optional;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use enumeration::Enumeration;
pub use mapping::{MapKey, Mapping};
pub use optional::OptionalValue;
pub use sequence::Sequence;

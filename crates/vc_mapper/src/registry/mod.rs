//! Registration of target types and their behaviour.
//!
//! A [`TypeDescriptor`](crate::info::TypeDescriptor) is pure data. The
//! behaviour the mapper needs for a type (building a list from items, reading
//! the entries of a map, producing the schema of a structure) is stored as
//! [`TypeTrait`] objects in the type's [`TypeMeta`], inside a [`TypeRegistry`].
//!
//! - [`GetTypeMeta`]: implemented by every registrable type; also registers the
//!   types it depends on (element types, slot types).
//! - [`FromType`]: builds a type trait for a concrete type.
//! - [`TypeRegistryArc`]: a shareable, lock-protected registry.

// -----------------------------------------------------------------------------
// Modules

mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use from_type::FromType;
pub use traits::{TypeTraitEnum, TypeTraitMapping, TypeTraitOptional};
pub use traits::{TypeTraitSequence, TypeTraitStructure};
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, TypeRegistryArc};
pub use type_trait::TypeTrait;

//! Structured target types.
//!
//! A structured type declares its slots through a [`StructureSchema`], either
//! with `#[derive(Configurable)]` or by hand with a [`SchemaBuilder`].
//! [`discover`] validates a schema and picks the instantiation strategy,
//! producing a [`StructureDescriptor`]. The [`StructureCache`] memoizes
//! descriptors per type, so comment group ids stay stable across lookups.
//!
//! ## Strategies
//!
//! 1. A schema with a constructor is built by passing every converted slot
//!    value, in slot order, to that constructor.
//! 2. Otherwise a schema with a zero-argument constructor is built by
//!    creating a default instance and assigning each converted slot through
//!    its mutator. Every slot needs a mutator.
//!
//! A schema with neither is not a structure.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod descriptor;
mod schema;

// -----------------------------------------------------------------------------
// Exports

pub use cache::StructureCache;
pub use descriptor::{CommentGroupId, SlotDescriptor, StructureDescriptor, discover};
pub use schema::{SchemaBuilder, SlotSchema, StructureSchema};

pub(crate) use schema::{Accessor, Constructor, DefaultConstructor, Mutator, SlotDefault};

use crate::Reflect;
use crate::info::Typed;

// -----------------------------------------------------------------------------
// Configurable

/// A structured type with a statically declared schema.
///
/// Usually implemented with `#[derive(Configurable)]`.
///
/// # Example
///
/// ```
/// use vc_mapper::info::{TypeDescriptor, Typed, NonGenericDescriptorCell};
/// use vc_mapper::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitStructure};
/// use vc_mapper::structure::{Configurable, SchemaBuilder, StructureSchema};
/// use vc_mapper::raw::RawValue;
///
/// #[derive(Debug)]
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Typed for Endpoint {
///     fn type_descriptor() -> &'static TypeDescriptor {
///         static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
///         CELL.get_or_init(TypeDescriptor::structure::<Self>)
///     }
/// }
///
/// impl GetTypeMeta for Endpoint {
///     fn get_type_meta() -> TypeMeta {
///         let mut meta = TypeMeta::of::<Self>();
///         meta.insert_trait(TypeTraitStructure::new(Self::schema));
///         meta
///     }
///
///     fn register_dependencies(registry: &mut TypeRegistry) {
///         registry.register::<String>();
///         registry.register::<u16>();
///     }
/// }
///
/// impl Configurable for Endpoint {
///     fn schema() -> StructureSchema {
///         SchemaBuilder::<Self>::new()
///             .slot("host", |this| &this.host)
///             .slot("port", |this| &this.port)
///             .default_value(|| 8080_u16)
///             .construct(|args| Ok(Endpoint { host: args.next()?, port: args.next()? }))
///             .build()
///     }
/// }
///
/// let raw: RawValue = [("host", "localhost")].into_iter().collect();
/// let conversion = vc_mapper::Mapper::new().map_as::<Endpoint>(&raw).unwrap();
///
/// assert!(!conversion.is_fully_valid());
/// let endpoint = conversion.into_value().unwrap();
/// assert_eq!(endpoint.port, 8080);
/// ```
pub trait Configurable: Reflect + Typed {
    fn schema() -> StructureSchema;
}

use crate::registry::FromType;
use crate::structure::{Configurable, StructureSchema};

/// Produces the [`StructureSchema`] of a structured type.
///
/// Registered by `#[derive(Configurable)]`. Discovery turns the schema into a
/// cached [`StructureDescriptor`](crate::structure::StructureDescriptor).
#[derive(Clone)]
pub struct TypeTraitStructure {
    schema: fn() -> StructureSchema,
}

impl TypeTraitStructure {
    #[inline]
    pub fn new(schema: fn() -> StructureSchema) -> Self {
        Self { schema }
    }

    #[inline]
    pub fn schema(&self) -> StructureSchema {
        (self.schema)()
    }
}

impl<T: Configurable> FromType<T> for TypeTraitStructure {
    fn from_type() -> Self {
        Self { schema: T::schema }
    }
}

// -----------------------------------------------------------------------------
// Modules

mod enumeration;
mod mapping;
mod optional;
mod sequence;
mod structure;

// -----------------------------------------------------------------------------
// Exports

pub use enumeration::TypeTraitEnum;
pub use mapping::TypeTraitMapping;
pub use optional::TypeTraitOptional;
pub use sequence::TypeTraitSequence;
pub use structure::TypeTraitStructure;

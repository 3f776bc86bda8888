use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// A hard error that aborts a whole `map` or `export` call.
///
/// Data-quality problems never produce a `MapperError`: they are reported
/// through [`ConversionDiagnostics`](crate::diagnostics::ConversionDiagnostics)
/// and the validity flag. These variants describe broken type definitions or
/// contract violations in user code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapperError {
    #[error("structure `{ty}` has a slot with an empty export name")]
    EmptyExportName { ty: &'static str },

    #[error("structure `{ty}` has more than one slot exported as `{name}`")]
    DuplicateExportName { ty: &'static str, name: String },

    #[error("slot `{slot}` of `{ty}` has no mutator, but `{ty}` is built by mutation")]
    MissingMutator { ty: &'static str, slot: String },

    #[error("type `{ty}` at `{path}` is neither a leaf nor a structure: {reason}")]
    Unmappable {
        ty: &'static str,
        path: String,
        reason: &'static str,
    },

    #[error("map `{ty}` at `{path}` has key type `{key}`, only `String` keys are supported")]
    NonStringMapKey {
        ty: &'static str,
        key: &'static str,
        path: String,
    },

    #[error("type `{ty}` at `{path}` is not registered")]
    UnregisteredType { ty: &'static str, path: String },

    #[error("type `{ty}` at `{path}` is registered without the `{type_trait}` type trait")]
    MissingTypeTrait {
        ty: &'static str,
        type_trait: &'static str,
        path: String,
    },

    #[error("cannot assign slot `{slot}` of `{ty}`: expected `{expected}`, got {value}")]
    SlotAssignment {
        ty: &'static str,
        slot: String,
        expected: &'static str,
        value: String,
    },

    #[error("failed to construct `{ty}` at `{path}`: {message}")]
    Construction {
        ty: &'static str,
        path: String,
        message: String,
    },

    #[error("type mismatch at `{path}`: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        path: String,
    },
}

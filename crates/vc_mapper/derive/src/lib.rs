//! See following macros:
//!
//! - [`Configurable`](derive_configurable)
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CONFIG_ATTRIBUTE_NAME: &str = "config";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Configurable Derivation
///
/// `#[derive(Configurable)]` makes a type a mapping target. It implements:
///
/// - `Typed`
/// - `GetTypeMeta`
/// - `Configurable` (for `struct T { ... }`)
/// - `Enumeration` (for `enum T { A, B, ... }`)
///
/// The type must also implement `Debug`, `Send` and `Sync` to be `Reflect`.
///
/// ## Structs
///
/// Only structs with named fields are supported. Each field becomes a slot,
/// exported under the field name, in declaration order. Every field type
/// must itself be a mapping target.
///
/// ```rust, ignore
/// #[derive(Debug, Configurable)]
/// struct Server {
///     host: String,
///     #[config(default)]
///     port: u16,
/// }
/// ```
///
/// By default the struct is built by a generated constructor receiving every
/// slot value. A slot without a usable value and without a default makes the
/// whole struct absent.
///
/// ### Building by Mutation
///
/// With `#[config(mutable)]`, the struct is created with `Default::default()`
/// and each slot is assigned separately. The type must implement `Default`.
///
/// ```rust, ignore
/// #[derive(Debug, Default, Configurable)]
/// #[config(mutable)]
/// struct Limits {
///     #[config(default)]
///     max_users: u32,
///     motd: String,
/// }
/// ```
///
/// Here `#[config(default)]` keeps the value of the default instance.
///
/// ### Field Attributes
///
/// - `name = "..."`: export under another name.
/// - `comment = "..."`: a comment line written above the slot on export. Repeatable.
/// - `repeat_comments`: write the comments on every export of the slot,
///   not only on its first export in an export context.
/// - `default`: fall back to `Default::default()` of the field type (or to
///   the default instance's value with `mutable`).
/// - `default = "path::to::function"`: fall back to the value returned by a
///   `fn() -> FieldType`.
/// - `skip`: the field is not a slot. It is initialized with `Default::default()`.
///
/// ```rust, ignore
/// #[derive(Debug, Configurable)]
/// struct Motd {
///     #[config(name = "message", comment = "Shown on join", comment = "Supports colors")]
///     text: String,
///     #[config(default = "default_delay")]
///     delay: u64,
///     #[config(skip)]
///     rendered: Option<String>,
/// }
///
/// fn default_delay() -> u64 { 20 }
/// ```
///
/// ## Enums
///
/// Only unit variants are supported. The variant names are the canonical
/// names: input is matched ignoring case, and export writes the canonical name.
///
/// ```rust, ignore
/// #[derive(Debug, Configurable)]
/// enum Mode {
///     Fast,
///     #[config(name = "careful")]
///     Slow,
/// }
/// ```
///
/// ## Automatic Registration
///
/// `#[config(auto_register)]` submits the type to `TypeRegistry::auto_register`,
/// so it is known to the mapper without a manual `register` call.
/// It has no effect on generic types, or when the `auto_register` feature is disabled.
///
/// ```rust, ignore
/// #[derive(Debug, Configurable)]
/// #[config(auto_register)]
/// struct Root { /* ... */ }
/// ```
#[proc_macro_derive(Configurable, attributes(config))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ConfigDerive::from_input(&ast) {
        Ok(derive) => impls::impl_configurable(&derive).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

//! This independent module is used to provide the required path.
//! So as to minimize changes when the `vc_mapper` structure is modified.
//!
//! The only special feature is the path of vc_mapper itself,
//! See [`vc_mapper`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_mapper` crate.
///
/// 1. For crates that depend on `vc_mapper`, `::vc_mapper` is returned.
/// 2. For crates that depend on `vc_config`, `::vc_config::mapper` is returned.
/// 3. For other situations, `::vc_mapper` is returned, but this may be incorrect.
///
/// Reading the manifest is not cheap, so the path is obtained once per
/// derive and passed around.
pub(crate) fn vc_mapper() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_mapper"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod registry;
mod structure;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use registry::*;
pub(crate) use structure::*;

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::__macro_exports::auto_register
    }
}

#[inline(always)]
pub(crate) fn reflect_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn mapper_error_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::MapperError
    }
}

#[inline(always)]
pub(crate) fn enumeration_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::ops::Enumeration
    }
}

use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn configurable_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::structure::Configurable
    }
}

#[inline]
pub(crate) fn schema_builder_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::structure::SchemaBuilder
    }
}

#[inline]
pub(crate) fn structure_schema_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::structure::StructureSchema
    }
}

#[inline]
pub(crate) fn slot_args_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::instantiate::SlotArgs
    }
}

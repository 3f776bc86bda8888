use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn typed_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::info::Typed
    }
}

#[inline]
pub(crate) fn type_descriptor_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::info::TypeDescriptor
    }
}

#[inline(always)]
pub(crate) fn non_generic_descriptor_cell_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::info::NonGenericDescriptorCell
    }
}

#[inline(always)]
pub(crate) fn generic_descriptor_cell_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::info::GenericDescriptorCell
    }
}

use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_meta_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::TypeMeta
    }
}

#[inline]
pub(crate) fn get_type_meta_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::GetTypeMeta
    }
}

#[inline]
pub(crate) fn from_type_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::FromType
    }
}

#[inline]
pub(crate) fn type_registry_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::TypeRegistry
    }
}

#[inline]
pub(crate) fn type_trait_structure_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::TypeTraitStructure
    }
}

#[inline]
pub(crate) fn type_trait_enum_(vc_mapper_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_mapper_path::registry::TypeTraitEnum
    }
}

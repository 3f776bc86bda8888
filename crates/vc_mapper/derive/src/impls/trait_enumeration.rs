use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConfigEnum, ConfigVariant};

/// Generate implementation code for `Enumeration`.
///
/// The variant index is the declaration position, matching the order of
/// the names in the type's `EnumInfo`.
pub(crate) fn impl_trait_enumeration(info: &ConfigEnum) -> TokenStream {
    let meta = info.meta();
    let enumeration_ = crate::path::enumeration_(meta.vc_mapper_path());

    let from_arms = info
        .variants()
        .iter()
        .enumerate()
        .map(|(index, ConfigVariant { ident, .. })| {
            quote! {
                #index => ::core::option::Option::Some(Self::#ident),
            }
        });

    let index_arms = info
        .variants()
        .iter()
        .enumerate()
        .map(|(index, ConfigVariant { ident, .. })| {
            quote! {
                Self::#ident => #index,
            }
        });

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #enumeration_ for #ident #ty_generics #where_clause {
            fn from_variant_index(index: usize) -> ::core::option::Option<Self> {
                match index {
                    #(#from_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }
        }
    }
}

/// The tokens building the enum's `TypeDescriptor`.
pub(crate) fn enum_descriptor_tokens(info: &ConfigEnum) -> TokenStream {
    let type_descriptor_ = crate::path::type_descriptor_(info.meta().vc_mapper_path());
    let names = info.variants().iter().map(|variant| &variant.name);

    quote! {
        #type_descriptor_::enumeration::<Self>(&[ #(#names),* ])
    }
}

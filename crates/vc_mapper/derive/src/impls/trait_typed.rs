use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConfigMeta;

/// Generate implementation code for `Typed`.
///
/// `descriptor_tokens` builds the `TypeDescriptor`, and is evaluated once per
/// concrete type.
pub(crate) fn impl_trait_typed(meta: &ConfigMeta, descriptor_tokens: TokenStream) -> TokenStream {
    let vc_mapper_path = meta.vc_mapper_path();
    let typed_ = crate::path::typed_(vc_mapper_path);
    let type_descriptor_ = crate::path::type_descriptor_(vc_mapper_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let cell = crate::path::generic_descriptor_cell_(vc_mapper_path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_insert::<Self>(|| {
                #descriptor_tokens
            })
        }
    } else {
        let cell = crate::path::non_generic_descriptor_cell_(vc_mapper_path);
        quote! {
            static CELL: #cell = #cell::new();
            CELL.get_or_init(|| {
                #descriptor_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_descriptor() -> &'static #type_descriptor_ {
                #inner_cell_tokens
            }
        }
    }
}

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use crate::derive_data::ConfigMeta;

/// Generate implementation code for `GetTypeMeta` trait.
///
/// `type_trait` is the path of the one type trait the shape needs, built
/// through `FromType<Self>`. `register_deps_tokens` registers the field types.
pub(crate) fn impl_trait_get_type_meta(
    meta: &ConfigMeta,
    type_trait: TokenStream,
    register_deps_tokens: TokenStream,
) -> TokenStream {
    let vc_mapper_path = meta.vc_mapper_path();
    let get_type_meta_ = crate::path::get_type_meta_(vc_mapper_path);
    let type_meta_ = crate::path::type_meta_(vc_mapper_path);
    let from_type_ = crate::path::from_type_(vc_mapper_path);

    let outer_ = Ident::new("__outer", Span::call_site());

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #get_type_meta_ for #ident #ty_generics #where_clause {
            fn get_type_meta() -> #type_meta_ {
                let mut #outer_ = #type_meta_::of::<Self>();
                #type_meta_::insert_trait::<#type_trait>(&mut #outer_, #from_type_::<Self>::from_type());
                #outer_
            }

            #register_deps_tokens
        }
    }
}

/// Generate `register_dependencies`, registering each distinct type once.
pub(crate) fn register_dependencies_tokens(
    meta: &ConfigMeta,
    types: &[&syn::Type],
) -> TokenStream {
    if types.is_empty() {
        return crate::utils::empty();
    }

    let type_registry_ = crate::path::type_registry_(meta.vc_mapper_path());

    let mut unique: Vec<&syn::Type> = Vec::with_capacity(types.len());
    for ty in types {
        if !unique.contains(ty) {
            unique.push(ty);
        }
    }

    quote! {
        fn register_dependencies(__registry: &mut #type_registry_) {
            #( #type_registry_::register::<#unique>(__registry); )*
        }
    }
}

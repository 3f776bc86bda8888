//! Code generation of the derived impls.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_configurable;
mod trait_enumeration;
mod trait_get_type_meta;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConfigDerive, ConfigEnum, ConfigStruct};

use auto_register::get_auto_register_impl;
use trait_configurable::impl_trait_configurable;
use trait_enumeration::{enum_descriptor_tokens, impl_trait_enumeration};
use trait_get_type_meta::{impl_trait_get_type_meta, register_dependencies_tokens};
use trait_typed::impl_trait_typed;

pub(crate) fn impl_configurable(derive: &ConfigDerive) -> TokenStream {
    let tokens = match derive {
        ConfigDerive::Struct(info) => impl_struct(info),
        ConfigDerive::Enum(info) => impl_enum(info),
    };

    quote! {
        const _: () = {
            #tokens
        };
    }
}

fn impl_struct(info: &ConfigStruct) -> TokenStream {
    let meta = info.meta();
    let vc_mapper_path = meta.vc_mapper_path();
    let type_descriptor_ = crate::path::type_descriptor_(vc_mapper_path);
    let type_trait_structure_ = crate::path::type_trait_structure_(vc_mapper_path);

    let typed_impl = impl_trait_typed(
        meta,
        quote! {
            #type_descriptor_::structure::<Self>()
        },
    );

    let field_types: Vec<&syn::Type> = info.active_fields().map(|field| field.ty).collect();
    let get_type_meta_impl = impl_trait_get_type_meta(
        meta,
        type_trait_structure_,
        register_dependencies_tokens(meta, &field_types),
    );

    let configurable_impl = impl_trait_configurable(info);
    let auto_register_impl = get_auto_register_impl(meta);

    quote! {
        #typed_impl
        #get_type_meta_impl
        #configurable_impl
        #auto_register_impl
    }
}

fn impl_enum(info: &ConfigEnum) -> TokenStream {
    let meta = info.meta();
    let type_trait_enum_ = crate::path::type_trait_enum_(meta.vc_mapper_path());

    let typed_impl = impl_trait_typed(meta, enum_descriptor_tokens(info));
    let get_type_meta_impl =
        impl_trait_get_type_meta(meta, type_trait_enum_, crate::utils::empty());
    let enumeration_impl = impl_trait_enumeration(info);
    let auto_register_impl = get_auto_register_impl(meta);

    quote! {
        #typed_impl
        #get_type_meta_impl
        #enumeration_impl
        #auto_register_impl
    }
}

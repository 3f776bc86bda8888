use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{ConfigField, ConfigStruct, FieldDefault};

/// Generate implementation code for `Configurable`.
///
/// The schema lists the active fields in declaration order. Without
/// `#[config(mutable)]` the struct is built by a constructor taking every
/// slot value in that order. With it, the struct is default constructed and
/// each slot gets a mutator.
pub(crate) fn impl_trait_configurable(info: &ConfigStruct) -> TokenStream {
    let meta = info.meta();
    let vc_mapper_path = meta.vc_mapper_path();
    let configurable_ = crate::path::configurable_(vc_mapper_path);
    let schema_builder_ = crate::path::schema_builder_(vc_mapper_path);
    let structure_schema_ = crate::path::structure_schema_(vc_mapper_path);

    let mutable = meta.attrs().mutable.is_some();

    let slots = info
        .active_fields()
        .map(|field| slot_tokens(field, mutable));

    let instantiation = if mutable {
        quote! {
            .default_construct(<Self as ::core::default::Default>::default)
        }
    } else {
        constructor_tokens(info)
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #configurable_ for #ident #ty_generics #where_clause {
            fn schema() -> #structure_schema_ {
                #schema_builder_::<Self>::new()
                    #(#slots)*
                    #instantiation
                    .build()
            }
        }
    }
}

fn slot_tokens(field: &ConfigField, mutable: bool) -> TokenStream {
    let ident = field.ident;
    let ty = field.ty;
    let name = field.export_name();

    let mutator = if mutable {
        quote! {
            .mutable(|this: &mut Self, value: #ty| this.#ident = value)
        }
    } else {
        crate::utils::empty()
    };

    let default = match &field.attrs.default {
        FieldDefault::None => crate::utils::empty(),
        // A mutated instance already holds the value of `Default`.
        FieldDefault::Default(span) if mutable => quote_spanned! { *span =>
            .with_default()
        },
        FieldDefault::Default(span) => quote_spanned! { *span =>
            .default_value(<#ty as ::core::default::Default>::default)
        },
        FieldDefault::Path(path) => quote! {
            .default_value::<#ty>(#path)
        },
    };

    let comments = field.attrs.comments.iter().map(|line| {
        quote! {
            .comment(#line)
        }
    });

    let repeat_comments = match field.attrs.repeat_comments {
        Some(span) => quote_spanned! { span =>
            .repeat_comments()
        },
        None => crate::utils::empty(),
    };

    quote! {
        .slot(#name, |this| &this.#ident)
        #mutator
        #default
        #(#comments)*
        #repeat_comments
    }
}

fn constructor_tokens(info: &ConfigStruct) -> TokenStream {
    let vc_mapper_path = info.meta().vc_mapper_path();
    let mapper_error_ = crate::path::mapper_error_(vc_mapper_path);
    let slot_args_ = crate::path::slot_args_(vc_mapper_path);

    // Field initializers run in declaration order, which is slot order.
    let initializers = info.fields().iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        if field.is_active() {
            quote! {
                #ident: __args.next::<#ty>()?
            }
        } else {
            quote! {
                #ident: ::core::default::Default::default()
            }
        }
    });

    quote! {
        .construct(|__args: &mut #slot_args_<'_>| -> ::core::result::Result<Self, #mapper_error_> {
            ::core::result::Result::Ok(Self {
                #(#initializers,)*
            })
        })
    }
}

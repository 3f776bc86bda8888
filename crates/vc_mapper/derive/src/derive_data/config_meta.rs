use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, ImplGenerics, Path, Type, TypeGenerics, WhereClause};

use super::TypeAttributes;

/// Information shared by every derived impl of one type.
pub(crate) struct ConfigMeta<'a> {
    vc_mapper_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Types of the mapped fields, bounded in the generated where clauses.
    active_types: Vec<&'a Type>,
}

impl core::fmt::Debug for ConfigMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConfigMeta")
            .field("vc_mapper_path", &self.vc_mapper_path.to_token_stream())
            .field("ident", self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ConfigMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            vc_mapper_path: crate::path::vc_mapper(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: Vec<&'a Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn vc_mapper_path(&self) -> &Path {
        &self.vc_mapper_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics
            .params
            .iter()
            .any(|param| !matches!(param, GenericParam::Lifetime(_)))
    }

    /// Split generics for an `impl` block.
    ///
    /// Every type parameter gets `Send + Sync + Debug + 'static`, and every
    /// active field type gets `GetTypeMeta + Reflect`, which is what the
    /// generated impls need from them.
    pub fn split_generics(&self) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        (impl_generics, ty_generics, self.where_clause(where_clause))
    }

    fn where_clause(&self, where_clause: Option<&WhereClause>) -> TokenStream {
        let vc_mapper_path = &self.vc_mapper_path;
        let get_type_meta_ = crate::path::get_type_meta_(vc_mapper_path);
        let reflect_ = crate::path::reflect_(vc_mapper_path);

        let param_bounds = self.generics.type_params().map(|param| {
            let ident = &param.ident;
            quote! {
                #ident: ::core::marker::Send + ::core::marker::Sync + ::core::fmt::Debug + 'static
            }
        });

        let field_bounds = if self.impl_with_generic() {
            self.active_types
                .iter()
                .map(|ty| quote!(#ty: #get_type_meta_ + #reflect_))
                .collect()
        } else {
            Vec::new()
        };

        let predicates = where_clause.map(|clause| &clause.predicates);
        if predicates.is_none_or(|p| p.is_empty()) && !self.impl_with_generic() {
            return crate::utils::empty();
        }

        let predicates = predicates.into_iter().flatten();
        quote! {
            where
                #(#predicates,)*
                #(#param_bounds,)*
                #(#field_bounds,)*
        }
    }
}

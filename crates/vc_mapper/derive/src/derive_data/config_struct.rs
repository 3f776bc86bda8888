use std::collections::HashMap;

use syn::spanned::Spanned;
use syn::{DataStruct, Fields, Ident, Type};

use super::{ConfigMeta, FieldAttributes};

/// One named field of a derived struct.
pub(crate) struct ConfigField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl ConfigField<'_> {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.attrs.skip.is_none()
    }

    /// The export name: the `name` attribute, or the field name without `r#`.
    pub fn export_name(&self) -> String {
        match &self.attrs.name {
            Some(name) => name.value(),
            None => crate::utils::unraw(self.ident),
        }
    }
}

pub(crate) struct ConfigStruct<'a> {
    meta: ConfigMeta<'a>,
    fields: Vec<ConfigField<'a>>,
}

impl<'a> ConfigStruct<'a> {
    pub fn new(mut meta: ConfigMeta<'a>, data: &'a DataStruct) -> syn::Result<Self> {
        let named = match &data.fields {
            Fields::Named(named) => named,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    data.struct_token.span(),
                    "`Configurable` cannot be derived for tuple structs, slots need field names",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new(
                    data.struct_token.span(),
                    "`Configurable` cannot be derived for unit structs",
                ));
            }
        };

        let mut fields = Vec::with_capacity(named.named.len());
        for field in &named.named {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            fields.push(ConfigField {
                ident,
                ty: &field.ty,
                attrs: FieldAttributes::parse(&field.attrs)?,
            });
        }

        let mut seen = HashMap::new();
        for field in fields.iter().filter(|field| field.is_active()) {
            let name = field.export_name();
            if let Some(previous) = seen.insert(name.clone(), field.ident) {
                let mut err = syn::Error::new(
                    field.ident.span(),
                    format!("export name `{name}` is already used by field `{previous}`"),
                );
                err.combine(syn::Error::new(previous.span(), "first used here"));
                return Err(err);
            }
        }

        meta.set_active_types(
            fields
                .iter()
                .filter(|field| field.is_active())
                .map(|field| field.ty)
                .collect(),
        );

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ConfigMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[ConfigField<'a>] {
        &self.fields
    }

    pub fn active_fields(&self) -> impl Iterator<Item = &ConfigField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }
}

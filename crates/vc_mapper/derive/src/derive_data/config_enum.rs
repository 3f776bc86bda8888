use syn::spanned::Spanned;
use syn::{DataEnum, Fields, Ident};

use super::{ConfigMeta, VariantAttributes};

/// One unit variant with its canonical name.
pub(crate) struct ConfigVariant<'a> {
    pub ident: &'a Ident,
    pub name: String,
}

pub(crate) struct ConfigEnum<'a> {
    meta: ConfigMeta<'a>,
    variants: Vec<ConfigVariant<'a>>,
}

impl<'a> ConfigEnum<'a> {
    pub fn new(meta: ConfigMeta<'a>, data: &'a DataEnum) -> syn::Result<Self> {
        if let Some(span) = meta.attrs().mutable {
            return Err(syn::Error::new(span, "`mutable` only applies to structs"));
        }
        if data.variants.is_empty() {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Configurable` cannot be derived for enums without variants",
            ));
        }

        let mut variants: Vec<ConfigVariant<'a>> = Vec::with_capacity(data.variants.len());
        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.span(),
                    "`Configurable` enums may only have unit variants",
                ));
            }

            let attrs = VariantAttributes::parse(&variant.attrs)?;
            let name = match attrs.name {
                Some(name) => name.value(),
                None => crate::utils::unraw(&variant.ident),
            };

            // Names are matched ignoring case when mapping.
            if let Some(other) = variants
                .iter()
                .find(|other| other.name.to_lowercase() == name.to_lowercase())
            {
                return Err(syn::Error::new(
                    variant.ident.span(),
                    format!(
                        "variant name `{name}` is indistinguishable from `{}` ignoring case",
                        other.name
                    ),
                ));
            }

            variants.push(ConfigVariant {
                ident: &variant.ident,
                name,
            });
        }

        Ok(Self { meta, variants })
    }

    #[inline]
    pub fn meta(&self) -> &ConfigMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn variants(&self) -> &[ConfigVariant<'a>] {
        &self.variants
    }
}

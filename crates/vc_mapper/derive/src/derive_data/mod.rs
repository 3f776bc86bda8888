//! Parsed form of a `#[derive(Configurable)]` input.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod config_enum;
mod config_meta;
mod config_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldDefault, TypeAttributes, VariantAttributes};
pub(crate) use config_enum::{ConfigEnum, ConfigVariant};
pub(crate) use config_meta::ConfigMeta;
pub(crate) use config_struct::{ConfigField, ConfigStruct};

use syn::{Data, DeriveInput};

/// A deriving type, by shape.
pub(crate) enum ConfigDerive<'a> {
    Struct(ConfigStruct<'a>),
    Enum(ConfigEnum<'a>),
}

impl<'a> ConfigDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse(&input.attrs)?;
        let meta = ConfigMeta::new(attrs, &input.ident, &input.generics);

        match &input.data {
            Data::Struct(data) => ConfigStruct::new(meta, data).map(Self::Struct),
            Data::Enum(data) => ConfigEnum::new(meta, data).map(Self::Enum),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "`Configurable` cannot be derived for unions",
            )),
        }
    }
}

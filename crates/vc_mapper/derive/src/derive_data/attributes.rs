//! Parsing of `#[config(...)]` attributes.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, ExprPath, LitStr, Token};

use crate::CONFIG_ATTRIBUTE_NAME;

fn config_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(CONFIG_ATTRIBUTE_NAME))
}

fn set_flag(flag: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if flag.is_some() {
        return Err(meta.error("duplicate attribute"));
    }
    *flag = Some(meta.path.span());
    Ok(())
}

fn parse_name(name: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if name.is_some() {
        return Err(meta.error("duplicate `name` attribute"));
    }
    let lit: LitStr = meta.value()?.parse()?;
    if lit.value().is_empty() {
        return Err(syn::Error::new(lit.span(), "export name must not be empty"));
    }
    *name = Some(lit);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Attributes on the deriving type.
///
/// - `#[config(mutable)]`: build by default construction and mutation.
/// - `#[config(auto_register)]`: submit the type for automatic registration.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub mutable: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in config_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("mutable") {
                    set_flag(&mut this.mutable, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut this.auto_register, &meta)
                } else {
                    Err(meta.error("expected `mutable` or `auto_register`"))
                }
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// What a slot falls back to when its input is unusable.
#[derive(Default, Debug)]
pub(crate) enum FieldDefault {
    /// The slot is mandatory.
    #[default]
    None,
    /// `#[config(default)]`
    Default(Span),
    /// `#[config(default = "path::to::function")]`
    Path(ExprPath),
}

/// Attributes on a struct field.
///
/// - `name = "..."`: the export name, the field name otherwise.
/// - `comment = "..."`: one comment line, repeatable.
/// - `repeat_comments`: emit the comments on every export.
/// - `default` or `default = "path"`: the slot is optional.
/// - `skip`: the field is not a slot.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub name: Option<LitStr>,
    pub comments: Vec<LitStr>,
    pub repeat_comments: Option<Span>,
    pub default: FieldDefault,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in config_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    parse_name(&mut this.name, &meta)
                } else if meta.path.is_ident("comment") {
                    this.comments.push(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("repeat_comments") {
                    set_flag(&mut this.repeat_comments, &meta)
                } else if meta.path.is_ident("default") {
                    if !matches!(this.default, FieldDefault::None) {
                        return Err(meta.error("duplicate `default` attribute"));
                    }
                    this.default = if meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        FieldDefault::Path(lit.parse()?)
                    } else {
                        FieldDefault::Default(meta.path.span())
                    };
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    set_flag(&mut this.skip, &meta)
                } else {
                    Err(meta.error(
                        "expected `name`, `comment`, `repeat_comments`, `default` or `skip`",
                    ))
                }
            })?;
        }

        if let Some(span) = this.skip
            && (this.name.is_some()
                || !this.comments.is_empty()
                || this.repeat_comments.is_some()
                || !matches!(this.default, FieldDefault::None))
        {
            return Err(syn::Error::new(
                span,
                "a skipped field cannot carry other `config` attributes",
            ));
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// Attributes on an enum variant: `name = "..."` overrides the canonical name.
#[derive(Default, Debug)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in config_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    parse_name(&mut this.name, &meta)
                } else {
                    Err(meta.error("expected `name`"))
                }
            })?;
        }
        Ok(this)
    }
}

use proc_macro2::TokenStream;
use syn::Ident;
use syn::ext::IdentExt;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// The name of `ident` without a raw identifier prefix.
#[inline]
pub(crate) fn unraw(ident: &Ident) -> String {
    ident.unraw().to_string()
}

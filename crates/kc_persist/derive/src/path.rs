//! Paths into `kc_persist` as seen from the crate being expanded.

use proc_macro2::TokenStream;
use quote::quote;

/// The path of `kc_persist`, see [`kc_macro_utils::Manifest`] for the rules.
///
/// Reading the manifest is not free, so resolve once per expansion and pass
/// the result around.
pub(crate) fn kc_persist() -> syn::Path {
    kc_macro_utils::Manifest::resolve("kc_persist")
}

#[inline(always)]
pub(crate) fn macro_exports_(kc_persist: &syn::Path) -> TokenStream {
    quote! { #kc_persist::__macro_exports }
}

#[inline(always)]
pub(crate) fn codec_(kc_persist: &syn::Path) -> TokenStream {
    quote! { #kc_persist::codec }
}

#[inline(always)]
pub(crate) fn directives_(kc_persist: &syn::Path) -> TokenStream {
    quote! { #kc_persist::directive::Directives }
}

//! Absolute paths of `core` items, for generated code that must not be
//! affected by names in scope at the call site.

use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub fn result_() -> TokenStream {
    quote! { ::core::result::Result }
}

#[inline(always)]
pub fn clone_() -> TokenStream {
    quote! { ::core::clone::Clone }
}

#[inline(always)]
pub fn static_str_() -> TokenStream {
    quote! { &'static str }
}

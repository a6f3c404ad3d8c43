use proc_macro2::TokenStream;
use quote::quote;

use kc_macro_utils::full_path as fp;

use crate::derive_data::PersistEnum;
use crate::path;

pub(crate) fn impl_persist_enum(data: PersistEnum<'_>) -> TokenStream {
    let kc_persist = path::kc_persist();
    let codec_ = path::codec_(&kc_persist);
    let macro_exports_ = path::macro_exports_(&kc_persist);
    let result_ = fp::result_();
    let static_str_ = fp::static_str_();

    let ident = &data.ast.ident;
    let variants: Vec<_> = data.cases.iter().map(|(variant, _)| *variant).collect();
    let names: Vec<_> = data.cases.iter().map(|(_, name)| name).collect();

    quote! {
        impl #codec_::EnumValue for #ident {
            const CASES: &'static [Self] = &[#(Self::#variants),*];

            fn case_name(&self) -> #static_str_ {
                match *self {
                    #(Self::#variants => #names,)*
                }
            }
        }

        impl #codec_::Value for #ident {
            #[inline]
            fn to_text(&self) -> #macro_exports_::String {
                #codec_::enum_to_text(self)
            }

            #[inline]
            fn from_text(text: &str) -> #result_<Self, #kc_persist::ConvertError> {
                #codec_::enum_from_text(text)
            }
        }
    }
}

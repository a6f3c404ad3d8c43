use proc_macro2::TokenStream;
use quote::quote;
use syn::{LitStr, parse_quote};

use kc_macro_utils::full_path as fp;

use crate::derive_data::{PersistStruct, PropertyAttribute, is_phantom, name_of};
use crate::path;

fn directives(
    kc_persist: &syn::Path,
    comments: &[LitStr],
    section: Option<&LitStr>,
) -> TokenStream {
    let directives_ = path::directives_(kc_persist);
    let section = section.map(|section| quote! { .with_section(#section) });
    quote! {
        #directives_::new()
            #(.with_comment(#comments))*
            #section
    }
}

fn property_step(kc_persist: &syn::Path, property: &PropertyAttribute) -> TokenStream {
    let PropertyAttribute {
        name,
        get,
        set,
        ty,
        comments,
        section,
    } = property;
    let directives = directives(kc_persist, comments, section.as_ref());
    let turbofish = ty.as_ref().map(|ty| quote! { ::<#ty> });
    quote! {
        .property_with #turbofish (#name, #get, #set, #directives)
    }
}

pub(crate) fn impl_persist(data: PersistStruct<'_>) -> TokenStream {
    let kc_persist = path::kc_persist();
    let result_ = fp::result_();
    let clone_ = fp::clone_();

    let mut steps = Vec::with_capacity(data.fields.len() + data.attrs.properties.len());

    for (field, attrs) in &data.fields {
        if attrs.skip || is_phantom(&field.ty) {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;

        if attrs.flatten {
            steps.push(quote! {
                .inherit::<#ty>(
                    |this: &Self| &this.#ident,
                    |this: &mut Self| &mut this.#ident,
                )
            });
            continue;
        }

        let name = attrs.rename.clone().unwrap_or_else(|| name_of(ident));
        let directives = directives(&kc_persist, &attrs.comments, attrs.section.as_ref());
        steps.push(quote! {
            .field_with::<#ty>(
                #name,
                |this: &Self| -> #ty { #clone_::clone(&this.#ident) },
                |this: &mut Self, value: #ty| { this.#ident = value; },
                #directives,
            )
        });
    }

    // Properties follow the fields.
    for property in &data.attrs.properties {
        steps.push(property_step(&kc_persist, property));
    }

    let hook = data.attrs.hook.then(|| quote! { .hook() });

    let ast = data.ast;
    let ident = &ast.ident;
    let tree_name = data.attrs.name.clone().unwrap_or_else(|| name_of(ident));

    let mut generics = ast.generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote! { #param: 'static });
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #kc_persist::Persist for #ident #ty_generics #where_clause {
            fn schema() -> #result_<#kc_persist::Schema<Self>, #kc_persist::SchemaError> {
                #kc_persist::SchemaBuilder::<Self>::named(#tree_name)
                    #(#steps)*
                    #hook
                    .build()
            }
        }
    }
}

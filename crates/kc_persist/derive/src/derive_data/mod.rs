//! Parsing of the annotated item into the data the impls need.

mod field_attributes;
mod type_attributes;

pub(crate) use field_attributes::{FieldAttributes, is_phantom};
pub(crate) use type_attributes::{PropertyAttribute, TypeAttributes};

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr};

use crate::PERSIST_ATTRIBUTE_NAME;

/// The member name of `ident`, without a raw prefix.
pub(crate) fn name_of(ident: &Ident) -> LitStr {
    LitStr::new(&ident.unraw().to_string(), ident.span())
}

// -----------------------------------------------------------------------------
// Struct

pub(crate) struct PersistStruct<'a> {
    pub ast: &'a DeriveInput,
    pub attrs: TypeAttributes,
    /// Named fields in declaration order, each with its attributes.
    pub fields: Vec<(&'a Field, FieldAttributes)>,
}

impl<'a> PersistStruct<'a> {
    pub fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &ast.data else {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`Persist` can only be derived for structs, use `PersistEnum` for enumerations",
            ));
        };

        let fields = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| Ok((field, FieldAttributes::parse(field)?)))
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &ast.ident,
                    "`Persist` cannot be derived for tuple structs, members need names",
                ));
            }
        };

        Ok(Self {
            ast,
            attrs: TypeAttributes::parse(&ast.attrs)?,
            fields,
        })
    }
}

// -----------------------------------------------------------------------------
// Enum

pub(crate) struct PersistEnum<'a> {
    pub ast: &'a DeriveInput,
    /// Variant identifiers with their stored names, in declaration order.
    pub cases: Vec<(&'a Ident, LitStr)>,
}

impl<'a> PersistEnum<'a> {
    pub fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &ast.data else {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`PersistEnum` can only be derived for enumerations",
            ));
        };
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "`PersistEnum` cannot be derived for generic enumerations",
            ));
        }

        let mut cases = Vec::with_capacity(data.variants.len());
        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "`PersistEnum` requires every variant to be fieldless",
                ));
            }

            let mut name = name_of(&variant.ident);
            for attr in &variant.attrs {
                if !attr.path().is_ident(PERSIST_ATTRIBUTE_NAME) {
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        name = meta.value()?.parse()?;
                        Ok(())
                    } else {
                        Err(meta.error("unknown variant attribute, expected `rename`"))
                    }
                })?;
            }
            cases.push((&variant.ident, name));
        }

        Ok(Self { ast, cases })
    }
}

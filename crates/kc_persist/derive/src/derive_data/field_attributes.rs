use syn::spanned::Spanned;
use syn::{Field, LitStr, Token, Type};

use crate::PERSIST_ATTRIBUTE_NAME;

/// Parsed `#[persist(...)]` attributes of one field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `#[persist(skip)]`
    pub skip: bool,
    /// `#[persist(flatten)]`
    pub flatten: bool,
    /// `#[persist(rename = "...")]`
    pub rename: Option<LitStr>,
    /// `#[persist(comment = "...")]`, repeatable.
    pub comments: Vec<LitStr>,
    /// `#[persist(section = "...")]`, or `#[persist(section)]` for the
    /// default section.
    pub section: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident(PERSIST_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    attrs.skip = true;
                } else if meta.path.is_ident("flatten") {
                    attrs.flatten = true;
                } else if meta.path.is_ident("rename") {
                    attrs.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("comment") {
                    attrs.comments.push(meta.value()?.parse()?);
                } else if meta.path.is_ident("section") {
                    attrs.section = Some(if meta.input.peek(Token![=]) {
                        meta.value()?.parse()?
                    } else {
                        LitStr::new("", meta.path.span())
                    });
                } else {
                    return Err(meta.error(
                        "unknown field attribute, expected `skip`, `flatten`, `rename`, `comment` or `section`",
                    ));
                }
                Ok(())
            })?;
        }

        if attrs.flatten
            && (attrs.rename.is_some() || !attrs.comments.is_empty() || attrs.section.is_some())
        {
            return Err(syn::Error::new(
                field.span(),
                "`flatten` cannot be combined with `rename`, `comment` or `section`",
            ));
        }

        Ok(attrs)
    }
}

/// `PhantomData` fields carry nothing to store.
pub(crate) fn is_phantom(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "PhantomData"),
        _ => false,
    }
}

use proc_macro2::Span;
use syn::{Attribute, Expr, LitStr, Token, Type};

use crate::PERSIST_ATTRIBUTE_NAME;

/// A `property(...)` entry of the type attributes.
///
/// ```ignore
/// #[persist(property(name = "minutes", get = Self::minutes, set = Self::set_minutes))]
/// ```
pub(crate) struct PropertyAttribute {
    pub name: LitStr,
    pub get: Expr,
    pub set: Expr,
    /// Explicit member type, only needed when it cannot be inferred.
    pub ty: Option<Type>,
    pub comments: Vec<LitStr>,
    pub section: Option<LitStr>,
}

/// Parsed `#[persist(...)]` attributes of the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[persist(name = "...")]`, the name of the produced tree.
    pub name: Option<LitStr>,
    /// `#[persist(hook)]`
    pub hook: bool,
    pub properties: Vec<PropertyAttribute>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(PERSIST_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("hook") {
                    out.hook = true;
                } else if meta.path.is_ident("property") {
                    let mut name: Option<LitStr> = None;
                    let mut get: Option<Expr> = None;
                    let mut set: Option<Expr> = None;
                    let mut ty: Option<Type> = None;
                    let mut comments = Vec::new();
                    let mut section = None;

                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("name") {
                            name = Some(inner.value()?.parse()?);
                        } else if inner.path.is_ident("get") {
                            get = Some(inner.value()?.parse()?);
                        } else if inner.path.is_ident("set") {
                            set = Some(inner.value()?.parse()?);
                        } else if inner.path.is_ident("ty") {
                            ty = Some(inner.value()?.parse()?);
                        } else if inner.path.is_ident("comment") {
                            comments.push(inner.value()?.parse()?);
                        } else if inner.path.is_ident("section") {
                            section = Some(if inner.input.peek(Token![=]) {
                                inner.value()?.parse()?
                            } else {
                                LitStr::new("", Span::call_site())
                            });
                        } else {
                            return Err(inner.error(
                                "unknown property attribute, expected `name`, `get`, `set`, `ty`, `comment` or `section`",
                            ));
                        }
                        Ok(())
                    })?;

                    let (Some(name), Some(get), Some(set)) = (name, get, set) else {
                        return Err(meta.error("`property` requires `name`, `get` and `set`"));
                    };
                    out.properties.push(PropertyAttribute {
                        name,
                        get,
                        set,
                        ty,
                        comments,
                        section,
                    });
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `name`, `hook` or `property`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}

use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ConvertError

/// A member value could not be turned from text back into its type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("`{type_name}` has no codec and no parse contract")]
    NoParseContract { type_name: &'static str },

    #[error("`{text}` is not a case of `{type_name}`")]
    UnknownCase {
        type_name: &'static str,
        text: String,
    },

    #[error("cannot read `{type_name}` from `{text}`: {reason}")]
    Invalid {
        type_name: &'static str,
        text: String,
        reason: String,
    },
}

impl ConvertError {
    /// Shorthand for [`ConvertError::Invalid`] naming `T`.
    pub fn invalid<T: ?Sized>(text: &str, reason: impl Display) -> Self {
        Self::Invalid {
            type_name: core::any::type_name::<T>(),
            text: text.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for [`ConvertError::NoParseContract`] naming `T`.
    pub fn no_parse_contract<T: ?Sized>() -> Self {
        Self::NoParseContract {
            type_name: core::any::type_name::<T>(),
        }
    }
}

// -----------------------------------------------------------------------------
// SchemaError

/// A member list cannot be stored without losing or corrupting data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("`{type_name}` declares a member with an empty name")]
    EmptyName { type_name: &'static str },

    #[error("`{type_name}` declares more than one member named `{member}`")]
    DuplicateMember {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("member name `{member}` of `{type_name}` cannot be used as a key")]
    ReservedName {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("section `{section}` on `{type_name}.{member}` cannot be used as a child name")]
    ReservedSection {
        type_name: &'static str,
        member: &'static str,
        section: &'static str,
    },

    #[error("section `{section}` of `{type_name}` collides with a tree member of the same name")]
    SectionCollision {
        type_name: &'static str,
        section: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::{ConvertError, SchemaError};

    #[test]
    fn messages_name_the_type() {
        let err = ConvertError::invalid::<f32>("abc", "invalid float literal");
        assert_eq!(
            err.to_string(),
            "cannot read `f32` from `abc`: invalid float literal"
        );

        let err = SchemaError::DuplicateMember {
            type_name: "Timer",
            member: "name",
        };
        assert_eq!(
            err.to_string(),
            "`Timer` declares more than one member named `name`"
        );
    }
}

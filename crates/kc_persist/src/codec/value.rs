use alloc::string::{String, ToString};
use core::any::type_name;

use crate::ConvertError;

// -----------------------------------------------------------------------------
// Value

/// A type that can be stored as a single tree entry.
///
/// `to_text` is the fallback used when the [`CodecRegistry`] has no codec
/// for the type, `from_text` is the parse contract used on the way back.
/// Types without a parse contract keep the default `from_text`, which fails
/// with [`ConvertError::NoParseContract`]; such a type can still be read back
/// once a codec is registered for it.
///
/// Enumerations should derive [`PersistEnum`] instead of implementing this
/// by hand.
///
/// [`CodecRegistry`]: crate::CodecRegistry
/// [`PersistEnum`]: crate::derive::PersistEnum
pub trait Value: Sized + 'static {
    /// The default textual form.
    fn to_text(&self) -> String;

    /// Parses the textual form.
    fn from_text(text: &str) -> Result<Self, ConvertError> {
        let _ = text;
        Err(ConvertError::no_parse_contract::<Self>())
    }
}

macro_rules! impl_value_from_str {
    ($($ty:ty),* $(,)?) => {$(
        impl Value for $ty {
            #[inline]
            fn to_text(&self) -> String {
                self.to_string()
            }

            fn from_text(text: &str) -> Result<Self, ConvertError> {
                text.trim()
                    .parse::<$ty>()
                    .map_err(|err| ConvertError::invalid::<$ty>(text, err))
            }
        }
    )*};
}

impl_value_from_str!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl Value for bool {
    fn to_text(&self) -> String {
        if *self { "True".into() } else { "False".into() }
    }

    fn from_text(text: &str) -> Result<Self, ConvertError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::invalid::<bool>(text, "expected `True` or `False`"))
        }
    }
}

impl Value for char {
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, ConvertError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConvertError::invalid::<char>(text, "expected exactly one character")),
        }
    }
}

impl Value for String {
    #[inline]
    fn to_text(&self) -> String {
        self.clone()
    }

    #[inline]
    fn from_text(text: &str) -> Result<Self, ConvertError> {
        Ok(text.into())
    }
}

// -----------------------------------------------------------------------------
// EnumValue

/// A fieldless enumeration stored by case name.
///
/// Usually implemented through `#[derive(PersistEnum)]`, which also
/// provides the matching [`Value`] implementation.
///
/// # Examples
///
/// ```
/// use kc_persist::EnumValue;
/// use kc_persist::derive::PersistEnum;
///
/// #[derive(PersistEnum, Clone, Copy, Debug, PartialEq)]
/// enum Mode {
///     Launch,
///     Flight,
/// }
///
/// assert_eq!(Mode::Flight.case_name(), "Flight");
/// assert_eq!(Mode::CASES, [Mode::Launch, Mode::Flight]);
/// ```
pub trait EnumValue: Clone + 'static {
    /// Every case, in declaration order.
    const CASES: &'static [Self];

    /// The name written to the tree.
    fn case_name(&self) -> &'static str;
}

/// Writes the case name of `value`.
#[inline]
pub fn enum_to_text<E: EnumValue>(value: &E) -> String {
    value.case_name().into()
}

/// Finds the case whose name matches `text`, ignoring ASCII case and
/// surrounding whitespace.
pub fn enum_from_text<E: EnumValue>(text: &str) -> Result<E, ConvertError> {
    let wanted = text.trim();
    E::CASES
        .iter()
        .find(|case| case.case_name().eq_ignore_ascii_case(wanted))
        .cloned()
        .ok_or_else(|| ConvertError::UnknownCase {
            type_name: type_name::<E>(),
            text: text.into(),
        })
}

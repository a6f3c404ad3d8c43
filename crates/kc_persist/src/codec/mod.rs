//! Text conversion of member values.
//!
//! Every value member of a persisted object goes through the
//! [`CodecRegistry`] in both directions:
//!
//! 1. A [`Codec`] registered for the exact member type wins.
//! 2. Otherwise the type's own [`Value`] implementation is used. Enumerations
//!    write their case name and read it back ignoring case, every other type
//!    writes its textual form and reads it with its parse contract.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, codecs can be declared next to the type
//! they convert with [`submit_codec!`](crate::submit_codec) and collected at
//! runtime through [`CodecRegistry::auto_register`]. Collection relies on the
//! [`inventory`] crate, and platforms it does not support simply collect
//! nothing.
//!
//! [`inventory`]: https://docs.rs/inventory

mod builtin;
mod value;

pub use builtin::{RectCodec, Vec2Codec};
pub use value::{EnumValue, Value, enum_from_text, enum_to_text};

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::fmt;

use kc_utils::TypeIdMap;

use crate::ConvertError;
use crate::math::{Rect, Vec2};

// -----------------------------------------------------------------------------
// Codec

/// A two-way conversion between `T` and its stored text.
///
/// `deserialize` receives the member's current value, so a codec may keep
/// parts of it that the text does not carry.
pub trait Codec<T>: Send + Sync + 'static {
    fn serialize(&self, value: &T) -> String;

    fn deserialize(&self, existing: T, text: &str) -> Result<T, ConvertError>;
}

/// A [`Codec`] made of two plain functions.
///
/// # Examples
///
/// ```
/// use kc_persist::{CodecRegistry, ConvertError};
/// use kc_persist::codec::FnCodec;
///
/// fn write(value: &u32) -> String {
///     format!("{value:#x}")
/// }
///
/// fn read(_: u32, text: &str) -> Result<u32, ConvertError> {
///     let digits = text.trim_start_matches("0x");
///     u32::from_str_radix(digits, 16).map_err(|err| ConvertError::invalid::<u32>(text, err))
/// }
///
/// let mut codecs = CodecRegistry::empty();
/// codecs.register::<u32>(FnCodec::new(write, read));
///
/// assert_eq!(codecs.serialize_value(&255u32), "0xff");
/// assert_eq!(codecs.deserialize_value(0u32, "0x10"), Ok(16));
/// ```
pub struct FnCodec<T> {
    serialize: fn(&T) -> String,
    deserialize: fn(T, &str) -> Result<T, ConvertError>,
}

impl<T> FnCodec<T> {
    #[inline]
    pub const fn new(
        serialize: fn(&T) -> String,
        deserialize: fn(T, &str) -> Result<T, ConvertError>,
    ) -> Self {
        Self {
            serialize,
            deserialize,
        }
    }
}

impl<T: 'static> Codec<T> for FnCodec<T> {
    #[inline]
    fn serialize(&self, value: &T) -> String {
        (self.serialize)(value)
    }

    #[inline]
    fn deserialize(&self, existing: T, text: &str) -> Result<T, ConvertError> {
        (self.deserialize)(existing, text)
    }
}

// -----------------------------------------------------------------------------
// CodecRegistry

struct CodecEntry {
    type_name: &'static str,
    // `Box<dyn Codec<T>>` for the type the entry is keyed by.
    codec: Box<dyn Any + Send + Sync>,
}

/// Codecs keyed by the exact type they convert.
///
/// The registry is built up front and then shared read-only by every
/// serialize and deserialize call, so it can be placed in a `static` or
/// behind an `Arc` once populated.
///
/// # Examples
///
/// ```
/// use kc_persist::CodecRegistry;
/// use kc_persist::math::Vec2;
///
/// let codecs = CodecRegistry::new();
///
/// assert_eq!(codecs.serialize_value(&Vec2::new(1.5, 2.0)), "1.5,2");
/// assert_eq!(codecs.deserialize_value(Vec2::ZERO, "3,4"), Ok(Vec2::new(3.0, 4.0)));
///
/// // No codec for `f32`, its own textual form is used.
/// assert_eq!(codecs.serialize_value(&0.25f32), "0.25");
/// ```
pub struct CodecRegistry {
    codecs: TypeIdMap<CodecEntry>,
}

impl Default for CodecRegistry {
    /// See [`CodecRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.codecs.values().map(|entry| entry.type_name))
            .finish()
    }
}

impl CodecRegistry {
    /// Creates a registry without any codec.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            codecs: TypeIdMap::new(),
        }
    }

    /// Creates a registry with the built-in codecs.
    ///
    /// - [`Vec2`] as `x,y`
    /// - [`Rect`] as `x,y,width,height`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<Vec2>(Vec2Codec);
        registry.register::<Rect>(RectCodec);
        registry
    }

    /// Registers `codec` for `T`, replacing the previous one.
    ///
    /// Returns `true` if a codec was replaced.
    pub fn register<T: 'static>(&mut self, codec: impl Codec<T>) -> bool {
        let codec: Box<dyn Codec<T>> = Box::new(codec);
        let entry = CodecEntry {
            type_name: type_name::<T>(),
            codec: Box::new(codec),
        };
        let replaced = self.codecs.insert_type::<T>(entry).is_some();
        if replaced {
            log::debug!("CodecRegistry: replaced the codec for `{}`", type_name::<T>());
        }
        replaced
    }

    /// Registers a [`FnCodec`] for `T`.
    #[inline]
    pub fn register_fn<T: 'static>(
        &mut self,
        serialize: fn(&T) -> String,
        deserialize: fn(T, &str) -> Result<T, ConvertError>,
    ) -> bool {
        self.register::<T>(FnCodec::new(serialize, deserialize))
    }

    /// Returns `true` if a codec is registered for `T`.
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.codecs.contains_type::<T>()
    }

    /// Returns the codec registered for `T`.
    pub fn get<T: 'static>(&self) -> Option<&dyn Codec<T>> {
        let entry = self.codecs.get_type::<T>()?;
        let codec = entry.codec.downcast_ref::<Box<dyn Codec<T>>>()?;
        Some(&**codec)
    }

    /// Removes the codec registered for `T`, returning `true` if there was one.
    #[inline]
    pub fn remove<T: 'static>(&mut self) -> bool {
        self.codecs.remove_type::<T>().is_some()
    }

    /// Number of registered codecs.
    #[inline]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Names of the types with a codec, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.codecs.values().map(|entry| entry.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Converts `value` to its stored text.
    pub fn serialize_value<T: Value>(&self, value: &T) -> String {
        match self.get::<T>() {
            Some(codec) => {
                log::trace!("CodecRegistry: codec found for `{}`", type_name::<T>());
                codec.serialize(value)
            }
            None => value.to_text(),
        }
    }

    /// Converts stored text back to a value.
    ///
    /// `existing` is the member's current value. It is handed to a registered
    /// codec and otherwise dropped.
    pub fn deserialize_value<T: Value>(&self, existing: T, text: &str) -> Result<T, ConvertError> {
        match self.get::<T>() {
            Some(codec) => codec.deserialize(existing, text),
            None => T::from_text(text),
        }
    }

    /// Registers every codec declared with [`submit_codec!`](crate::submit_codec),
    /// replacing codecs already present for the same types.
    ///
    /// Returns `true` if collection works on the current platform. Without
    /// the `auto_register` feature this does nothing and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use kc_persist::{Codec, CodecRegistry, ConvertError, Value, submit_codec};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Heading(f32);
    ///
    /// impl Value for Heading {
    ///     fn to_text(&self) -> String {
    ///         format!("{}", self.0)
    ///     }
    /// }
    ///
    /// struct HeadingCodec;
    ///
    /// impl Codec<Heading> for HeadingCodec {
    ///     fn serialize(&self, value: &Heading) -> String {
    ///         format!("{}deg", value.0)
    ///     }
    ///
    ///     fn deserialize(&self, _: Heading, text: &str) -> Result<Heading, ConvertError> {
    ///         let digits = text.trim_end_matches("deg");
    ///         digits
    ///             .parse()
    ///             .map(Heading)
    ///             .map_err(|err| ConvertError::invalid::<Heading>(text, err))
    ///     }
    /// }
    ///
    /// submit_codec!(Heading => HeadingCodec);
    ///
    /// let mut codecs = CodecRegistry::empty();
    /// if codecs.auto_register() {
    ///     assert_eq!(codecs.serialize_value(&Heading(90.0)), "90deg");
    /// }
    /// ```
    #[inline]
    pub fn auto_register(&mut self) -> bool {
        self.collect_submitted()
    }

    #[cfg(feature = "auto_register")]
    fn collect_submitted(&mut self) -> bool {
        use crate::__macro_exports::auto_register::{CodecRegistration, inventory};

        let mut available = false;
        for registration in inventory::iter::<CodecRegistration> {
            match registration {
                CodecRegistration::Available => available = true,
                CodecRegistration::Codec(register) => register(self),
            }
        }
        available
    }

    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    fn collect_submitted(&mut self) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// submit_codec

/// Declares a codec to be collected by [`CodecRegistry::auto_register`].
///
/// The codec expression is evaluated each time the registry collects it.
/// Without the `auto_register` feature the declaration is discarded.
///
/// ```ignore
/// submit_codec!(Heading => HeadingCodec);
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_codec {
    ($ty:ty => $codec:expr) => {
        const _: () = {
            fn __register(registry: &mut $crate::codec::CodecRegistry) {
                registry.register::<$ty>($codec);
            }

            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::CodecRegistration::Codec(__register)
            }
        };
    };
}

/// Declares a codec to be collected by [`CodecRegistry::auto_register`].
///
/// The `auto_register` feature is disabled, so the declaration is discarded.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! submit_codec {
    ($ty:ty => $codec:expr) => {};
}

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macros emit `::kc_persist::...` paths when the calling crate does
// not depend on `kc_core`. Inside this crate (tests and doc tests) that path
// must resolve to `crate`.
extern crate self as kc_persist;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod options;

pub mod codec;
pub mod de;
pub mod directive;
pub mod ext;
pub mod hook;
pub mod math;
pub mod schema;
pub mod ser;

#[doc(hidden)]
pub mod __macro_exports;

#[cfg(test)]
mod testing;

#[cfg(test)]
mod round_trip;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use kc_persist_derive as derive;
pub use kc_tree::Tree;

pub use codec::{Codec, CodecRegistry, EnumValue, Value};
pub use de::{TreeDeserializer, deserialize};
pub use directive::{Directive, Directives};
pub use error::{ConvertError, SchemaError};
pub use ext::TreeExt;
pub use hook::PersistHook;
pub use options::PersistOptions;
pub use schema::{Persist, Schema, SchemaBuilder, members_of};
pub use ser::{TreeSerializer, serialize};

//! Derive macros of `kc_persist`:
//!
//! - [`Persist`]
//! - [`PersistEnum`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static PERSIST_ATTRIBUTE_NAME: &str = "persist";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Persist` for a struct with named fields (or a unit struct).
///
/// Every named field becomes a member, in declaration order, followed by
/// the declared properties. Members are read through `Clone` and written by
/// assignment, so every member type must be `Clone` as well as a `Value`,
/// a `Tree` or an `Option<Tree>`.
///
/// `PhantomData` fields are ignored.
///
/// ## Field attributes
///
/// ```rust, ignore
/// #[derive(Persist)]
/// struct Timer {
///     // Not a member at all, its type needs no conversion.
///     #[persist(skip)]
///     handle: Handle,
///     // Written as `// elapsed = ...` entries right before the value.
///     #[persist(comment = "seconds", comment = "since launch")]
///     elapsed: f64,
///     // Placed in the child tree `Window`. A bare `section` uses `Subsection`.
///     #[persist(section = "Window")]
///     rect: Rect,
///     // Stored under another key.
///     #[persist(rename = "isPaused")]
///     paused: bool,
///     // Members of `Base` are declared here, as if written in place.
///     #[persist(flatten)]
///     base: Base,
/// }
/// ```
///
/// ## Type attributes
///
/// ```rust, ignore
/// #[derive(Persist)]
/// // Name of the produced tree, the type name by default.
/// #[persist(name = "KCoopTimer")]
/// // Run the type's `PersistHook` after the member pass.
/// #[persist(hook)]
/// // A computed member. `ty`, `comment` and `section` are optional.
/// #[persist(property(name = "minutes", get = Self::minutes, set = Self::set_minutes, ty = f64))]
/// struct Timer { /* ... */ }
/// ```
#[proc_macro_derive(Persist, attributes(persist))]
pub fn derive_persist(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::PersistStruct::parse(&ast) {
        Ok(data) => impls::impl_persist(data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Implements `EnumValue` and `Value` for a fieldless enumeration.
///
/// Cases are stored by name and read back ignoring ASCII case. The type must
/// also implement `Clone`.
///
/// ```rust, ignore
/// #[derive(PersistEnum, Clone, Copy)]
/// enum Mode {
///     Launch,
///     // Stored as `InFlight`.
///     #[persist(rename = "InFlight")]
///     Flight,
/// }
/// ```
#[proc_macro_derive(PersistEnum, attributes(persist))]
pub fn derive_persist_enum(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::PersistEnum::parse(&ast) {
        Ok(data) => impls::impl_persist_enum(data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

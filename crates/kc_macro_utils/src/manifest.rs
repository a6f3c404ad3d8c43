use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Ident, PathSegment};
use toml_edit::{Document, Item, Table};

/// The `Cargo.toml` of the crate a macro is expanded in.
///
/// Generated code must name the `kc_*` crates the way the calling crate
/// sees them, which depends on what it depends on.
///
/// # Resolution rules
///
/// For a requested crate such as `kc_persist`:
///
/// 1. Listed in `dependencies`: `::kc_persist`.
/// 2. The facade `kc_core` is listed in `dependencies`: `::kc_core::persist`.
/// 3. Steps 1 and 2 again with `dev-dependencies`.
/// 4. Otherwise, and whenever the manifest cannot be read: `::kc_persist`.
///
/// A crate naming itself this way needs `extern crate self as kc_persist;`
/// in its root.
///
/// # Example
///
/// ```
/// # use kc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::resolve("kc_persist");
/// ```
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified: SystemTime,
}

const FACADE_NAME: &str = "kc_core";
const CRATE_PREFIX: &str = "kc_";

fn absolute_path(segments: &[&str]) -> syn::Path {
    let mut path = syn::Path {
        leading_colon: Some(Default::default()),
        segments: Punctuated::new(),
    };
    for segment in segments {
        let ident = Ident::new(segment, Span::call_site());
        path.segments.push(PathSegment::from(ident));
    }
    path
}

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn load(path: &Path, modified: SystemTime) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        let document = Document::parse(text).ok()?;
        Some(Self { document, modified })
    }

    fn find_in(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(absolute_path(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            return Some(absolute_path(&[FACADE_NAME, module]));
        }
        None
    }

    /// The path of `name` as seen from this manifest's crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.document.get(table)
                && let Some(path) = Self::find_in(deps, name)
            {
                return path;
            }
        }
        absolute_path(&[name])
    }

    /// Runs `func` on the caller's manifest, parsed at most once per
    /// modification of the file.
    ///
    /// Returns `None` when the manifest cannot be located or read.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> Option<R> {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path()?;
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified == modified
            {
                return Some(func(manifest));
            }
        }

        let manifest = Self::load(&path, modified)?;
        let result = func(&manifest);
        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        Some(result)
    }

    /// Resolves `name` following the rules above.
    pub fn resolve(name: &str) -> syn::Path {
        Self::shared(|manifest| manifest.get_crate_path(name))
            .unwrap_or_else(|| absolute_path(&[name]))
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            document: Document::parse(text.to_string().into_boxed_str()).unwrap(),
            modified: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn path_of(manifest: &Manifest, name: &str) -> String {
        manifest.get_crate_path(name).to_token_stream().to_string()
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nkc_persist = \"0.1\"\nkc_core = \"0.1\"\n");
        assert_eq!(path_of(&m, "kc_persist"), ":: kc_persist");
    }

    #[test]
    fn through_facade() {
        let m = manifest("[dev-dependencies]\nkc_core = { path = \"..\" }\n");
        assert_eq!(path_of(&m, "kc_persist"), ":: kc_core :: persist");
    }

    #[test]
    fn fallback() {
        let m = manifest("[package]\nname = \"kc_persist\"\n");
        assert_eq!(path_of(&m, "kc_persist"), ":: kc_persist");
        assert_eq!(path_of(&m, "serde"), ":: serde");
    }
}

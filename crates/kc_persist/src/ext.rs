//! Single-entry helpers for hooks and hand-written loaders.

use core::any::type_name;

use kc_tree::Tree;

use crate::{CodecRegistry, Value};

/// Reads and writes single entries of a [`Tree`] with [`Value`] conversion.
///
/// Reads never fail: a missing or unreadable entry is logged and the given
/// default is returned.
///
/// # Examples
///
/// ```
/// use kc_persist::{Tree, TreeExt};
///
/// let mut tree = Tree::new("Settings");
/// tree.store("volume", &0.5f32);
/// tree.store("volume", &0.8f32);
///
/// assert_eq!(tree.get_values("volume").count(), 1);
/// assert_eq!(tree.parse_or("volume", 1.0f32), 0.8);
/// assert_eq!(tree.parse_or("missing", 1.0f32), 1.0);
/// assert_eq!(tree.read_string("name", "unnamed"), "unnamed");
/// ```
pub trait TreeExt {
    /// The first value stored under `key`, or `default`.
    fn read_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str;

    /// Parses the first value stored under `key` with [`Value::from_text`].
    fn parse_or<T: Value>(&self, key: &str, default: T) -> T;

    /// Parses the first value stored under `key` through `codecs`.
    ///
    /// A registered codec receives a copy of `default` as the current value.
    fn parse_with<T: Value + Clone>(&self, key: &str, default: T, codecs: &CodecRegistry) -> T;

    /// Replaces the first value stored under `key` with [`Value::to_text`],
    /// or appends one.
    fn store<T: Value>(&mut self, key: &str, value: &T);

    /// Replaces the first value stored under `key` through `codecs`, or
    /// appends one.
    fn store_with<T: Value>(&mut self, key: &str, value: &T, codecs: &CodecRegistry);
}

impl TreeExt for Tree {
    fn read_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get_value(key) {
            Some(text) => text,
            None => {
                log::warn!("`{}` has no value `{key}`", self.name());
                default
            }
        }
    }

    fn parse_or<T: Value>(&self, key: &str, default: T) -> T {
        let Some(text) = self.get_value(key) else {
            log::error!("`{}` has no value `{key}`", self.name());
            log::debug!("{self}");
            return default;
        };
        match T::from_text(text) {
            Ok(value) => value,
            Err(err) => {
                log::error!("cannot read `{key}` as `{}`: {err}", type_name::<T>());
                default
            }
        }
    }

    fn parse_with<T: Value + Clone>(&self, key: &str, default: T, codecs: &CodecRegistry) -> T {
        let Some(text) = self.get_value(key) else {
            log::error!("`{}` has no value `{key}`", self.name());
            log::debug!("{self}");
            return default;
        };
        match codecs.deserialize_value(default.clone(), text) {
            Ok(value) => value,
            Err(err) => {
                log::error!("cannot read `{key}` as `{}`: {err}", type_name::<T>());
                default
            }
        }
    }

    #[inline]
    fn store<T: Value>(&mut self, key: &str, value: &T) {
        self.set_value(key, value.to_text());
    }

    #[inline]
    fn store_with<T: Value>(&mut self, key: &str, value: &T, codecs: &CodecRegistry) {
        self.set_value(key, codecs.serialize_value(value));
    }
}

#[cfg(test)]
mod tests {
    use kc_tree::Tree;

    use super::TreeExt;
    use crate::CodecRegistry;
    use crate::math::{Rect, Vec2};
    use crate::testing::CapturedLogs;

    #[test]
    fn parse_or_logs_and_falls_back() {
        let logs = CapturedLogs::start();
        let mut tree = Tree::new("Config");
        tree.add_value("speed", "fast");

        assert_eq!(tree.parse_or("speed", 3u32), 3);
        assert_eq!(tree.parse_or("missing", 7i64), 7);
        assert!(logs.contains(log::Level::Error, "cannot read `speed` as `u32`"));
        assert!(logs.contains(log::Level::Error, "`Config` has no value `missing`"));
    }

    #[test]
    fn codec_backed_helpers() {
        let codecs = CodecRegistry::new();
        let mut tree = Tree::new("Window");
        tree.store_with("rect", &Rect::new(1.0, 2.0, 3.0, 4.0), &codecs);
        assert_eq!(tree.get_value("rect"), Some("1,2,3,4"));
        assert_eq!(
            tree.parse_with("rect", Rect::default(), &codecs),
            Rect::new(1.0, 2.0, 3.0, 4.0)
        );

        tree.store("offset", &Vec2::new(1.0, 2.0));
        assert_eq!(tree.get_value("offset"), Some("(1.0, 2.0)"));
        // Display form cannot be read back by the codec.
        assert_eq!(tree.parse_with("offset", Vec2::ZERO, &codecs), Vec2::ZERO);
    }

    #[test]
    fn read_string_returns_first() {
        let mut tree = Tree::new("Names");
        tree.add_value("name", "a");
        tree.add_value("name", "b");
        assert_eq!(tree.read_string("name", "none"), "a");
    }
}

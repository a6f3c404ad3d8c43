//! Tree to object.

use core::any::type_name;

use kc_tree::Tree;

use crate::schema::{AccessKind, Member};
use crate::{CodecRegistry, Persist};

// -----------------------------------------------------------------------------
// TreeDeserializer

/// Reads the eligible members of an existing object back from a [`Tree`].
///
/// Members are assigned in place, so anything the tree does not provide
/// keeps its current value. Problems are logged and never abort the pass:
///
/// | situation                                      | member    | result   |
/// |------------------------------------------------|-----------|----------|
/// | value missing or empty                         | unchanged | -        |
/// | value cannot be converted                      | unchanged | `false`  |
/// | member's section missing                       | unchanged | `false`  |
/// | tree member not stored at all                  | unchanged | -        |
/// | tree member's storage not holding one tree     | unchanged | `false`  |
///
/// The object's hook, if any, runs after the member pass regardless.
/// The result is also `false` when the type has neither an eligible member
/// nor a hook.
#[derive(Debug, Clone, Copy)]
pub struct TreeDeserializer<'a> {
    codecs: &'a CodecRegistry,
}

impl<'a> TreeDeserializer<'a> {
    #[inline]
    pub const fn new(codecs: &'a CodecRegistry) -> Self {
        Self { codecs }
    }

    /// Assigns `object`'s members from `tree`.
    ///
    /// Returns `true` only if every eligible member was read without a
    /// flagged problem.
    pub fn deserialize<O: Persist>(&self, tree: &Tree, object: &mut O) -> bool {
        let schema = match O::schema() {
            Ok(schema) => schema,
            Err(err) => {
                log::error!("cannot deserialize `{}`: {err}", type_name::<O>());
                return false;
            }
        };

        let mut success = true;
        let mut processed = 0_usize;
        for member in schema.members() {
            processed += 1;
            success &= match member.access() {
                AccessKind::Tree(access) => {
                    match Self::find_tree(tree, member) {
                        Ok(Some(stored)) => {
                            access.set(object, stored.clone());
                            log::trace!("assigned tree member `{}`", member.name());
                            true
                        }
                        Ok(None) => true,
                        Err(()) => false,
                    }
                }
                AccessKind::Value(access) => match Self::find_text(tree, member) {
                    Ok(Some(text)) => match access.read(object, text, self.codecs) {
                        Ok(()) => {
                            log::trace!("assigned `{}` from `{text}`", member.name());
                            true
                        }
                        Err(err) => {
                            log::warn!("failed to deserialize `{}`: {err}", member.name());
                            false
                        }
                    },
                    Ok(None) => true,
                    Err(()) => false,
                },
            };
        }

        for hook in schema.hooks() {
            hook.on_deserialize(object, tree);
        }

        if processed == 0 && !schema.has_hook() {
            log::warn!(
                "`{}` has no eligible member and no hook, nothing was deserialized",
                type_name::<O>()
            );
            return false;
        }
        success
    }

    // `Err` for a flagged problem, `Ok(None)` for a skipped member.
    fn find_text<'t, O: 'static>(tree: &'t Tree, member: &Member<O>) -> Result<Option<&'t str>, ()> {
        let source = match member.section() {
            Some(section) => match tree.get_node(section) {
                Some(node) => node,
                None => {
                    log::warn!(
                        "section `{section}` of `{}` not found in `{}`",
                        member.name(),
                        tree.name()
                    );
                    return Err(());
                }
            },
            None => tree,
        };

        match source.get_value(member.name()) {
            Some(text) if !text.is_empty() => Ok(Some(text)),
            _ => {
                log::warn!("no value stored for `{}`", member.name());
                Ok(None)
            }
        }
    }

    fn find_tree<'t, O: 'static>(tree: &'t Tree, member: &Member<O>) -> Result<Option<&'t Tree>, ()> {
        let Some(wrapper) = tree.get_node(member.name()) else {
            log::warn!("no tree stored for `{}`", member.name());
            return Ok(None);
        };

        let container = match member.section() {
            Some(section) => match wrapper.get_node(section) {
                Some(node) => node,
                None => {
                    log::warn!(
                        "section `{section}` of tree member `{}` not found",
                        member.name()
                    );
                    return Err(());
                }
            },
            None => wrapper,
        };

        match container.nodes() {
            [stored] => Ok(Some(stored)),
            nodes => {
                log::warn!(
                    "storage of tree member `{}` holds {} trees, expected exactly one",
                    member.name(),
                    nodes.len()
                );
                Err(())
            }
        }
    }
}

/// Assigns `object`'s members from `tree`.
///
/// See [`TreeDeserializer`] for the failure policy.
///
/// # Examples
///
/// ```
/// use kc_persist::{CodecRegistry, Tree};
/// use kc_persist::derive::Persist;
///
/// #[derive(Persist, Default)]
/// struct Limits {
///     max_speed: f32,
///     retries: u8,
/// }
///
/// let mut tree = Tree::new("Limits");
/// tree.add_value("max_speed", "12.5");
///
/// let mut limits = Limits { max_speed: 0.0, retries: 3 };
/// assert!(kc_persist::deserialize(&tree, &mut limits, &CodecRegistry::new()));
/// assert_eq!(limits.max_speed, 12.5);
/// // Not stored, so left untouched.
/// assert_eq!(limits.retries, 3);
/// ```
#[inline]
pub fn deserialize<O: Persist>(tree: &Tree, object: &mut O, codecs: &CodecRegistry) -> bool {
    TreeDeserializer::new(codecs).deserialize(tree, object)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use kc_tree::Tree;

    use crate::derive::{Persist, PersistEnum};
    use crate::testing::CapturedLogs;
    use crate::{CodecRegistry, PersistHook, deserialize};

    #[derive(PersistEnum, Clone, Copy, Debug, PartialEq)]
    enum Mode {
        Launch,
        Flight,
    }

    #[derive(Persist)]
    struct State {
        count: i32,
        mode: Mode,
        #[persist(section = "Extra")]
        label: String,
    }

    fn state() -> State {
        State {
            count: 1,
            mode: Mode::Launch,
            label: "old".into(),
        }
    }

    fn stored() -> Tree {
        let mut tree = Tree::new("State");
        tree.add_value("count", "5");
        tree.add_value("mode", "flight");
        tree.add_node("Extra").add_value("label", "new");
        tree
    }

    #[test]
    fn reads_every_member() {
        let mut state = state();
        assert!(deserialize(&stored(), &mut state, &CodecRegistry::new()));
        assert_eq!(state.count, 5);
        assert_eq!(state.mode, Mode::Flight);
        assert_eq!(state.label, "new");
    }

    #[test]
    fn missing_value_is_not_a_failure() {
        let logs = CapturedLogs::start();
        let mut tree = stored();
        tree.remove_value("count");
        tree.add_value("count", "");

        let mut state = state();
        assert!(deserialize(&tree, &mut state, &CodecRegistry::new()));
        assert_eq!(state.count, 1);
        assert!(logs.contains(log::Level::Warn, "no value stored for `count`"));
    }

    #[test]
    fn bad_value_fails_but_continues() {
        let logs = CapturedLogs::start();
        let mut tree = stored();
        tree.set_value("count", "five");

        let mut state = state();
        assert!(!deserialize(&tree, &mut state, &CodecRegistry::new()));
        assert_eq!(state.count, 1);
        assert_eq!(state.mode, Mode::Flight);
        assert_eq!(state.label, "new");
        assert!(logs.contains(log::Level::Warn, "failed to deserialize `count`"));
    }

    #[test]
    fn unknown_case_fails() {
        let mut tree = stored();
        tree.set_value("mode", "Orbit");

        let mut state = state();
        assert!(!deserialize(&tree, &mut state, &CodecRegistry::new()));
        assert_eq!(state.mode, Mode::Launch);
    }

    #[test]
    fn missing_section_fails() {
        let logs = CapturedLogs::start();
        let mut tree = stored();
        tree.remove_node("Extra");

        let mut state = state();
        assert!(!deserialize(&tree, &mut state, &CodecRegistry::new()));
        assert_eq!(state.label, "old");
        assert_eq!(state.count, 5);
        assert!(logs.contains(log::Level::Warn, "section `Extra`"));
    }

    #[derive(Persist, Default)]
    struct Holder {
        inner: Tree,
    }

    #[test]
    fn tree_member_needs_exactly_one_child() {
        let mut tree = Tree::new("Holder");
        let wrapper = tree.add_node("inner");
        wrapper.add_node("A");
        wrapper.add_node("B");

        let mut holder = Holder::default();
        assert!(!deserialize(&tree, &mut holder, &CodecRegistry::new()));
        assert_eq!(holder.inner, Tree::default());

        let mut tree = Tree::new("Holder");
        tree.add_node("inner");
        assert!(!deserialize(&tree, &mut holder, &CodecRegistry::new()));
        assert_eq!(holder.inner, Tree::default());

        let mut tree = Tree::new("Holder");
        tree.add_node("inner").add_node("Only").add_value("a", "1");
        assert!(deserialize(&tree, &mut holder, &CodecRegistry::new()));
        assert_eq!(holder.inner.name(), "Only");
    }

    #[test]
    fn missing_tree_member_is_skipped() {
        let logs = CapturedLogs::start();
        let mut holder = Holder::default();
        assert!(deserialize(&Tree::new("Holder"), &mut holder, &CodecRegistry::new()));
        assert!(logs.contains(log::Level::Warn, "no tree stored for `inner`"));
    }

    #[derive(Persist, Default)]
    struct Sectioned {
        #[persist(section = "S")]
        inner: Tree,
        count: u8,
    }

    fn sectioned() -> Sectioned {
        let mut inner = Tree::new("Inner");
        inner.add_value("a", "1");
        inner.add_value("b", "2");
        Sectioned { inner, count: 7 }
    }

    #[test]
    fn sectioned_tree_member_round_trips() {
        let codecs = CodecRegistry::new();
        let tree = crate::serialize(&sectioned(), &codecs).unwrap();

        let mut read = Sectioned::default();
        assert!(deserialize(&tree, &mut read, &codecs));
        assert_eq!(read.inner, sectioned().inner);
        assert_eq!(read.count, 7);
    }

    #[test]
    fn missing_section_of_tree_member_fails() {
        let logs = CapturedLogs::start();
        let codecs = CodecRegistry::new();
        let mut tree = crate::serialize(&sectioned(), &codecs).unwrap();
        tree.get_node_mut("inner").unwrap().remove_node("S");

        let mut read = Sectioned::default();
        assert!(!deserialize(&tree, &mut read, &codecs));
        assert_eq!(read.inner, Tree::default());
        assert_eq!(read.count, 7);
        assert!(logs.contains(log::Level::Warn, "section `S` of tree member `inner` not found"));
    }

    #[derive(Persist, Default)]
    #[persist(hook)]
    struct Throttle {
        level: u8,
    }

    impl PersistHook for Throttle {
        fn on_serialize(&self, _tree: &mut Tree) {}

        fn on_deserialize(&mut self, tree: &Tree) {
            if tree.has_value("locked") {
                self.level = 0;
            }
        }
    }

    #[test]
    fn hook_overrides_members_just_read() {
        let mut tree = Tree::new("Throttle");
        tree.add_value("level", "9");

        let mut throttle = Throttle::default();
        assert!(deserialize(&tree, &mut throttle, &CodecRegistry::new()));
        assert_eq!(throttle.level, 9);

        tree.add_value("locked", "True");
        assert!(deserialize(&tree, &mut throttle, &CodecRegistry::new()));
        assert_eq!(throttle.level, 0);
    }

    #[derive(Persist)]
    struct Nothing {
        #[persist(skip)]
        _ignored: u8,
    }

    #[derive(Persist, Default)]
    #[persist(hook)]
    struct OnlyHook {
        #[persist(skip)]
        seen: bool,
    }

    impl PersistHook for OnlyHook {
        fn on_serialize(&self, _tree: &mut Tree) {}

        fn on_deserialize(&mut self, _tree: &Tree) {
            self.seen = true;
        }
    }

    #[test]
    fn nothing_to_read() {
        let tree = Tree::new("Any");
        let mut nothing = Nothing { _ignored: 0 };
        assert!(!deserialize(&tree, &mut nothing, &CodecRegistry::new()));

        let mut hooked = OnlyHook::default();
        assert!(deserialize(&tree, &mut hooked, &CodecRegistry::new()));
        assert!(hooked.seen);
    }
}

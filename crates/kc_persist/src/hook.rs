use kc_tree::Tree;

/// Custom logic run after the member pass.
///
/// A type opts in with `#[persist(hook)]` (or [`SchemaBuilder::hook`]).
/// `on_serialize` runs once every eligible member has been written and may
/// add, change or remove anything in the tree. `on_deserialize` runs once
/// every eligible member has been read, whatever the outcome of that pass.
///
/// A type with a hook and no eligible member still counts as successfully
/// deserialized.
///
/// # Examples
///
/// ```
/// use kc_persist::{CodecRegistry, PersistHook, Tree, TreeExt};
/// use kc_persist::derive::Persist;
///
/// #[derive(Persist, Default)]
/// #[persist(hook)]
/// struct Waypoint {
///     label: String,
///     #[persist(skip)]
///     visits: u32,
/// }
///
/// impl PersistHook for Waypoint {
///     fn on_serialize(&self, tree: &mut Tree) {
///         tree.store("visits", &self.visits);
///     }
///
///     fn on_deserialize(&mut self, tree: &Tree) {
///         self.visits = tree.parse_or("visits", 0);
///     }
/// }
///
/// let codecs = CodecRegistry::new();
/// let point = Waypoint { label: "pad".into(), visits: 3 };
/// let tree = kc_persist::serialize(&point, &codecs).unwrap();
/// assert_eq!(tree.get_value("visits"), Some("3"));
///
/// let mut back = Waypoint::default();
/// assert!(kc_persist::deserialize(&tree, &mut back, &codecs));
/// assert_eq!((back.label.as_str(), back.visits), ("pad", 3));
/// ```
///
/// [`SchemaBuilder::hook`]: crate::SchemaBuilder::hook
pub trait PersistHook {
    fn on_serialize(&self, tree: &mut Tree);

    fn on_deserialize(&mut self, tree: &Tree);
}

use alloc::string::String;
use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Entry

/// A single `key = value` entry of a [`Tree`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    key: String,
    value: String,
}

impl Entry {
    /// Creates an entry.
    #[inline]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

// -----------------------------------------------------------------------------
// Tree

/// A named node holding ordered entries and ordered child trees.
///
/// Keys and child names may repeat. Every `get_*` lookup returns the first
/// match in insertion order, and every enumeration preserves insertion order.
/// Names are case-sensitive.
///
/// A deep copy is a plain [`Clone`].
///
/// # Examples
///
/// ```
/// use kc_tree::Tree;
///
/// let mut tree = Tree::new("Settings");
/// tree.add_value("volume", "0.5");
/// tree.add_value("volume", "0.8");
///
/// // First match wins.
/// assert_eq!(tree.get_value("volume"), Some("0.5"));
/// assert_eq!(tree.get_values("volume").collect::<Vec<_>>(), ["0.5", "0.8"]);
///
/// tree.set_value("volume", "1");
/// assert_eq!(tree.get_values("volume").collect::<Vec<_>>(), ["1", "0.8"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    values: Vec<Entry>,
    #[cfg_attr(feature = "serde", serde(default))]
    nodes: Vec<Tree>,
}

impl Tree {
    /// Creates an empty tree with the given name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Returns the name of this tree.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames this tree.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` if the tree holds neither entries nor children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }

    /// Removes all entries and children, keeping the name.
    pub fn clear_data(&mut self) {
        self.values.clear();
        self.nodes.clear();
    }

    // -------------------------------------------------------------------------
    // Values

    /// Appends an entry, even if the key already exists.
    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push(Entry::new(key, value));
    }

    /// Returns `true` if at least one entry uses `key`.
    pub fn has_value(&self, key: &str) -> bool {
        self.values.iter().any(|entry| entry.key == key)
    }

    /// Returns the value of the first entry using `key`.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|entry| entry.key == key)
            .map(Entry::value)
    }

    /// Returns the values of all entries using `key`, in order.
    pub fn get_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |entry| entry.key == key)
            .map(Entry::value)
    }

    /// Replaces the value of the first entry using `key`, or appends a new entry.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        match self.values.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.value = value.into(),
            None => self.values.push(Entry::new(key, value)),
        }
    }

    /// Removes the first entry using `key` and returns its value.
    pub fn remove_value(&mut self, key: &str) -> Option<String> {
        let index = self.values.iter().position(|entry| entry.key == key)?;
        Some(self.values.remove(index).value)
    }

    /// Removes every entry using `key`, returning how many were removed.
    pub fn remove_values(&mut self, key: &str) -> usize {
        let before = self.values.len();
        self.values.retain(|entry| entry.key != key);
        before - self.values.len()
    }

    /// All entries in insertion order.
    #[inline]
    pub fn values(&self) -> &[Entry] {
        &self.values
    }

    /// Number of entries.
    #[inline]
    pub fn count_values(&self) -> usize {
        self.values.len()
    }

    // -------------------------------------------------------------------------
    // Nodes

    /// Appends a new empty child and returns it.
    pub fn add_node(&mut self, name: impl Into<String>) -> &mut Tree {
        self.push_node(Tree::new(name))
    }

    /// Appends an existing tree as a child and returns it.
    pub fn push_node(&mut self, node: Tree) -> &mut Tree {
        let index = self.nodes.len();
        self.nodes.push(node);
        &mut self.nodes[index]
    }

    /// Returns `true` if at least one child is named `name`.
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|node| node.name == name)
    }

    /// Returns the first child named `name`.
    pub fn get_node(&self, name: &str) -> Option<&Tree> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Returns the first child named `name`, mutably.
    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut Tree> {
        self.nodes.iter_mut().find(|node| node.name == name)
    }

    /// Returns all children named `name`, in order.
    pub fn get_nodes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tree> + 'a {
        self.nodes.iter().filter(move |node| node.name == name)
    }

    /// Returns the first child named `name`, appending an empty one if none exists.
    pub fn get_or_add_node(&mut self, name: &str) -> &mut Tree {
        match self.nodes.iter().position(|node| node.name == name) {
            Some(index) => &mut self.nodes[index],
            None => self.add_node(name),
        }
    }

    /// Removes the first child named `name` and returns it.
    pub fn remove_node(&mut self, name: &str) -> Option<Tree> {
        let index = self.nodes.iter().position(|node| node.name == name)?;
        Some(self.nodes.remove(index))
    }

    /// All children in insertion order.
    #[inline]
    pub fn nodes(&self) -> &[Tree] {
        &self.nodes
    }

    /// Number of children.
    #[inline]
    pub fn count_nodes(&self) -> usize {
        self.nodes.len()
    }
}

//! Per-member placement directives.
//!
//! A member can be left out of the tree, preceded by comment entries, or
//! placed into a named child tree (its section). Directives are usually
//! written as `#[persist(...)]` attributes and collected by the derive
//! macro, or passed to [`SchemaBuilder::field_with`].
//!
//! [`SchemaBuilder::field_with`]: crate::SchemaBuilder::field_with

use alloc::vec::Vec;

/// Section used when a section directive is given an empty name.
pub const DEFAULT_SECTION_NAME: &str = "Subsection";

/// A single placement directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// The member is neither written nor read.
    Excluded,
    /// A comment entry written before the member's value.
    Comment(&'static str),
    /// The member is placed in the named child tree.
    Section(&'static str),
}

/// The directives attached to one member.
///
/// Comments keep their order, and a later section replaces an earlier one.
///
/// # Examples
///
/// ```
/// use kc_persist::{Directive, Directives};
///
/// let directives = Directives::new()
///     .with_comment("seconds since launch")
///     .with(Directive::Section(""));
///
/// assert!(!directives.is_excluded());
/// assert_eq!(directives.comments().collect::<Vec<_>>(), ["seconds since launch"]);
/// assert_eq!(directives.section(), Some("Subsection"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    excluded: bool,
    comments: Vec<&'static str>,
    section: Option<&'static str>,
}

impl Directives {
    /// No directive at all.
    #[inline]
    pub const fn new() -> Self {
        Self {
            excluded: false,
            comments: Vec::new(),
            section: None,
        }
    }

    /// Adds one directive.
    pub fn insert(&mut self, directive: Directive) {
        match directive {
            Directive::Excluded => self.excluded = true,
            Directive::Comment(text) => self.comments.push(text),
            Directive::Section(name) => {
                let name = if name.is_empty() {
                    DEFAULT_SECTION_NAME
                } else {
                    name
                };
                if let Some(previous) = self.section.replace(name) {
                    log::debug!("Directives: section `{previous}` replaced by `{name}`");
                }
            }
        }
    }

    #[inline]
    pub fn with(mut self, directive: Directive) -> Self {
        self.insert(directive);
        self
    }

    #[inline]
    pub fn exclude(self) -> Self {
        self.with(Directive::Excluded)
    }

    #[inline]
    pub fn with_comment(self, text: &'static str) -> Self {
        self.with(Directive::Comment(text))
    }

    #[inline]
    pub fn with_section(self, name: &'static str) -> Self {
        self.with(Directive::Section(name))
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Comment texts in declaration order.
    #[inline]
    pub fn comments(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.comments.iter().copied()
    }

    /// Name of the child tree the member is placed in.
    #[inline]
    pub fn section(&self) -> Option<&'static str> {
        self.section
    }
}

impl FromIterator<Directive> for Directives {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        let mut directives = Self::new();
        directives.extend(iter);
        directives
    }
}

impl Extend<Directive> for Directives {
    fn extend<I: IntoIterator<Item = Directive>>(&mut self, iter: I) {
        for directive in iter {
            self.insert(directive);
        }
    }
}

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

/// Knobs of the tree layout written by [`TreeSerializer`].
///
/// The defaults produce the layout expected by the host format.
///
/// # Examples
///
/// ```
/// use kc_persist::PersistOptions;
///
/// let options = PersistOptions::new();
/// assert_eq!(options.comment_key("elapsed"), "// elapsed");
///
/// let options = options.with_comment_prefix("# ").with_comments(false);
/// assert_eq!(options.comment_key("elapsed"), "# elapsed");
/// assert!(!options.write_comments());
///
/// // A comment key must never equal the member name.
/// let options = options.with_comment_prefix("");
/// assert_eq!(options.comment_prefix(), "# ");
/// ```
///
/// [`TreeSerializer`]: crate::TreeSerializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOptions {
    comment_prefix: Cow<'static, str>,
    write_comments: bool,
    default_tree_name: Cow<'static, str>,
}

impl PersistOptions {
    pub const fn new() -> Self {
        Self {
            comment_prefix: Cow::Borrowed("// "),
            write_comments: true,
            default_tree_name: Cow::Borrowed("Tree"),
        }
    }

    /// Sets the prefix of comment keys.
    ///
    /// An empty prefix is refused and the current one is kept: the comment
    /// key would be the member name itself and read back as its value.
    pub fn with_comment_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            log::warn!(
                "PersistOptions: empty comment prefix refused, keeping `{}`",
                self.comment_prefix
            );
        } else {
            self.comment_prefix = prefix;
        }
        self
    }

    pub fn with_comments(mut self, write_comments: bool) -> Self {
        self.write_comments = write_comments;
        self
    }

    pub fn with_default_tree_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.default_tree_name = name.into();
        self
    }

    /// Prepended to the member name to form the key of a comment entry.
    #[inline]
    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    /// Whether comment directives produce entries at all.
    #[inline]
    pub fn write_comments(&self) -> bool {
        self.write_comments
    }

    /// Name given to a nested tree that has none.
    #[inline]
    pub fn default_tree_name(&self) -> &str {
        &self.default_tree_name
    }

    /// Key of the comment entries written for `member`.
    #[inline]
    pub fn comment_key(&self, member: &str) -> String {
        format!("{}{member}", self.comment_prefix)
    }
}

impl Default for PersistOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

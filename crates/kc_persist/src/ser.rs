//! Object to tree.

use alloc::string::String;
use core::any::type_name;

use kc_tree::Tree;

use crate::schema::{AccessKind, Member, Schema};
use crate::{CodecRegistry, Persist, PersistOptions, SchemaError};

static DEFAULT_OPTIONS: PersistOptions = PersistOptions::new();

// -----------------------------------------------------------------------------
// TreeSerializer

/// Writes the eligible members of an object into a new [`Tree`].
///
/// The tree is named after the object's type. For every eligible member, in
/// declaration order:
///
/// - A value member becomes one `name = text` entry, preceded by one
///   `// name = comment` entry per comment directive. With a section
///   directive the entries go to the first child of that name, created on
///   first use.
/// - A tree member becomes a child named after the member holding a copy of
///   the member's tree. With a section directive the copy sits one level
///   deeper, inside a child named after the section.
///
/// The object's hook, if any, runs last.
///
/// # Examples
///
/// ```
/// use kc_persist::{CodecRegistry, TreeSerializer};
/// use kc_persist::derive::Persist;
/// use kc_persist::math::Rect;
///
/// #[derive(Persist)]
/// struct Window {
///     #[persist(comment = "screen space")]
///     rect: Rect,
///     #[persist(section = "Style")]
///     opacity: f32,
/// }
///
/// let codecs = CodecRegistry::new();
/// let window = Window { rect: Rect::new(0.0, 0.0, 200.0, 100.0), opacity: 0.75 };
/// let tree = TreeSerializer::new(&codecs).serialize(&window).unwrap();
///
/// assert_eq!(
///     tree.to_string(),
///     "Window\n{\n\t// rect = screen space\n\trect = 0,0,200,100\n\tStyle\n\t{\n\t\topacity = 0.75\n\t}\n}\n",
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeSerializer<'a> {
    codecs: &'a CodecRegistry,
    options: &'a PersistOptions,
}

impl<'a> TreeSerializer<'a> {
    /// A serializer with the default [`PersistOptions`].
    #[inline]
    pub fn new(codecs: &'a CodecRegistry) -> Self {
        Self::with_options(codecs, &DEFAULT_OPTIONS)
    }

    #[inline]
    pub const fn with_options(codecs: &'a CodecRegistry, options: &'a PersistOptions) -> Self {
        Self { codecs, options }
    }

    /// Serializes `object`.
    ///
    /// # Errors
    ///
    /// Fails only when the member list of `O` is invalid.
    pub fn serialize<O: Persist>(&self, object: &O) -> Result<Tree, SchemaError> {
        let schema = O::schema().inspect_err(|err| {
            log::error!("cannot serialize `{}`: {err}", type_name::<O>());
        })?;

        let mut tree = Tree::new(schema.type_name());
        for member in schema.members() {
            match member.access() {
                AccessKind::Tree(access) => self.write_tree(&mut tree, member, access.get(object)),
                AccessKind::Value(access) => {
                    let text = access.write(object, self.codecs);
                    self.write_value(&mut tree, &schema, member, text);
                }
            }
        }

        for hook in schema.hooks() {
            hook.on_serialize(object, &mut tree);
        }

        Ok(tree)
    }

    fn write_tree<O: 'static>(&self, tree: &mut Tree, member: &Member<O>, value: Option<Tree>) {
        let Some(mut copy) = value else {
            log::warn!(
                "`{}` holds no tree, nothing is stored for it",
                member.name()
            );
            return;
        };
        if copy.name().is_empty() {
            copy.set_name(self.options.default_tree_name());
        }

        let mut wrapper = Tree::new(member.name());
        match member.section() {
            Some(section) => wrapper.add_node(section).push_node(copy),
            None => wrapper.push_node(copy),
        };
        log::trace!("stored tree member `{}`", member.name());
        tree.push_node(wrapper);
    }

    fn write_value<O: 'static>(
        &self,
        tree: &mut Tree,
        schema: &Schema<O>,
        member: &Member<O>,
        text: String,
    ) {
        if text.is_empty() {
            log::warn!(
                "`{}` of type `{}` was written as an empty string",
                member.name(),
                member.type_name()
            );
        }

        let target = match member.section() {
            Some(section) => {
                if !tree.has_node(section) {
                    log::debug!("created section `{section}`");
                }
                tree.get_or_add_node(section)
            }
            None => tree,
        };

        let mut comments = member.directives().comments().peekable();
        if self.options.write_comments() && comments.peek().is_some() {
            let key = self.options.comment_key(member.name());
            // A comment stored under a member key would be read back as its value.
            if schema.member(&key).is_some() {
                log::warn!(
                    "comments of `{}` dropped, their key `{key}` names a member",
                    member.name()
                );
            } else {
                for comment in comments {
                    target.add_value(key.as_str(), comment);
                }
            }
        }
        log::trace!("stored `{} = {text}`", member.name());
        target.add_value(member.name(), text);
    }
}

/// Serializes `object` with the default [`PersistOptions`].
///
/// See [`TreeSerializer`] for the layout.
#[inline]
pub fn serialize<O: Persist>(object: &O, codecs: &CodecRegistry) -> Result<Tree, SchemaError> {
    TreeSerializer::new(codecs).serialize(object)
}

//! Member introspection.
//!
//! A [`Schema`] lists the members of a type, in declaration order, together
//! with their directives and type-erased accessors. It is produced by
//! [`Persist::schema`], which `#[derive(Persist)]` implements by listing
//! the named fields of a struct and any `property(...)` declared on it.
//!
//! Fields and properties are treated alike. A member marked
//! [`Directive::Excluded`] stays in the declared list but is not *eligible*:
//! the serializer and deserializer never touch it.
//!
//! [`Directive::Excluded`]: crate::Directive::Excluded

mod access;
mod builder;

pub use access::{Access, MemberType};
pub use builder::SchemaBuilder;

pub(crate) use access::{AccessKind, HookAccess};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::{Directives, SchemaError};

// -----------------------------------------------------------------------------
// Persist

/// A type whose members can be written to and read from a [`Tree`].
///
/// Usually derived:
///
/// ```
/// use kc_persist::{Persist, Tree};
/// use kc_persist::derive::Persist;
///
/// #[derive(Persist, Default)]
/// struct Timer {
///     name: String,
///     #[persist(comment = "seconds since start")]
///     elapsed: f64,
///     #[persist(skip)]
///     ticks: u64,
///     #[persist(section = "Extra")]
///     notes: Tree,
/// }
///
/// let schema = Timer::schema().unwrap();
/// let names: Vec<_> = schema.members().map(|m| m.name()).collect();
/// assert_eq!(names, ["name", "elapsed", "notes"]);
/// assert_eq!(schema.member("notes").unwrap().section(), Some("Extra"));
/// ```
///
/// [`Tree`]: crate::Tree
pub trait Persist: Sized + 'static {
    fn schema() -> Result<Schema<Self>, SchemaError>;
}

/// Lists the eligible members of `object`'s type, in declaration order.
///
/// The object itself is only used to name the type.
pub fn members_of<O: Persist>(_object: &O) -> Result<Vec<Member<O>>, SchemaError> {
    Ok(O::schema()?.into_members())
}

// -----------------------------------------------------------------------------
// Member

/// Whether a member is stored data or a computed accessor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

/// One member of a persisted type.
pub struct Member<O> {
    name: &'static str,
    kind: MemberKind,
    type_name: &'static str,
    type_id: TypeId,
    directives: Directives,
    access: Access<O>,
}

impl<O: 'static> Member<O> {
    pub(crate) fn new<T: MemberType>(
        name: &'static str,
        kind: MemberKind,
        directives: Directives,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
    ) -> Self {
        Self {
            name,
            kind,
            type_name: core::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            directives,
            access: T::into_access(get, set),
        }
    }

    pub(crate) fn lift<P: 'static>(
        self,
        base: fn(&P) -> &O,
        base_mut: fn(&mut P) -> &mut O,
    ) -> Member<P> {
        Member {
            name: self.name,
            kind: self.kind,
            type_name: self.type_name,
            type_id: self.type_id,
            directives: self.directives,
            access: self.access.lift(base, base_mut),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Full path of the member's declared type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if the member's declared type is `T`.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    /// Returns `true` if the member holds a nested tree.
    #[inline]
    pub fn is_tree(&self) -> bool {
        self.access.is_tree()
    }

    /// Returns `true` if the member takes part in serialization.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        !self.directives.is_excluded()
    }

    #[inline]
    pub fn section(&self) -> Option<&'static str> {
        self.directives.section()
    }

    #[inline]
    pub(crate) fn access(&self) -> &AccessKind<O> {
        &self.access.0
    }
}

impl<O> fmt::Debug for Member<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .field("directives", &self.directives)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Schema

/// The validated member list of a type.
pub struct Schema<O> {
    type_name: &'static str,
    members: Vec<Member<O>>,
    hooks: Vec<Box<dyn HookAccess<O>>>,
}

impl<O: 'static> Schema<O> {
    /// Name given to the tree the type is serialized into.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Eligible members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &Member<O>> {
        self.members.iter().filter(|member| member.is_eligible())
    }

    /// Every declared member, excluded ones included.
    #[inline]
    pub fn declared(&self) -> &[Member<O>] {
        &self.members
    }

    /// The first eligible member named `name`.
    pub fn member(&self, name: &str) -> Option<&Member<O>> {
        self.members().find(|member| member.name == name)
    }

    /// Number of eligible members.
    pub fn len(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the type, or a type it inherits from, has a hook.
    #[inline]
    pub fn has_hook(&self) -> bool {
        !self.hooks.is_empty()
    }

    /// Consumes the schema, keeping its eligible members.
    pub fn into_members(self) -> Vec<Member<O>> {
        self.members
            .into_iter()
            .filter(Member::is_eligible)
            .collect()
    }

    #[inline]
    pub(crate) fn hooks(&self) -> impl Iterator<Item = &dyn HookAccess<O>> {
        self.hooks.iter().map(|hook| &**hook)
    }
}

impl<O> fmt::Debug for Schema<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("members", &self.members)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// `my_crate::module::Timer<T>` becomes `Timer`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let path = match full.find('<') {
        Some(index) => &full[..index],
        None => full,
    };
    match path.rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::short_type_name;

    #[test]
    fn short_names() {
        assert_eq!(short_type_name("kc::timer::Timer"), "Timer");
        assert_eq!(short_type_name("kc::Wrap<alloc::string::String>"), "Wrap");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}

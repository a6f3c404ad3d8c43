use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::type_name;

use kc_utils::hash::HashSet;

use super::access::{DirectHook, HookAccess, Lifted};
use super::{Member, MemberKind, MemberType, Persist, Schema, short_type_name};
use crate::{Directives, PersistHook, SchemaError};

// -----------------------------------------------------------------------------
// SchemaBuilder

/// Declares the members of a type by hand.
///
/// This is what `#[derive(Persist)]` expands to, and the way to persist
/// types the derive cannot describe.
///
/// # Examples
///
/// ```
/// use kc_persist::{CodecRegistry, Directives, Persist, Schema, SchemaBuilder, SchemaError};
///
/// struct Clock {
///     seconds: f64,
/// }
///
/// impl Clock {
///     fn minutes(&self) -> f64 {
///         self.seconds / 60.0
///     }
///
///     fn set_minutes(&mut self, minutes: f64) {
///         self.seconds = minutes * 60.0;
///     }
/// }
///
/// impl Persist for Clock {
///     fn schema() -> Result<Schema<Self>, SchemaError> {
///         SchemaBuilder::new()
///             .property_with(
///                 "minutes",
///                 Clock::minutes,
///                 Clock::set_minutes,
///                 Directives::new().with_section("Time"),
///             )
///             .build()
///     }
/// }
///
/// let codecs = CodecRegistry::new();
/// let tree = kc_persist::serialize(&Clock { seconds: 90.0 }, &codecs).unwrap();
/// assert_eq!(tree.name(), "Clock");
/// assert_eq!(tree.get_node("Time").unwrap().get_value("minutes"), Some("1.5"));
/// ```
pub struct SchemaBuilder<O> {
    type_name: &'static str,
    members: Vec<Member<O>>,
    hooks: Vec<Box<dyn HookAccess<O>>>,
    error: Option<SchemaError>,
}

impl<O: 'static> Default for SchemaBuilder<O> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<O: 'static> SchemaBuilder<O> {
    /// Starts a schema named after the last path segment of `O`.
    #[inline]
    pub fn new() -> Self {
        Self::named(short_type_name(type_name::<O>()))
    }

    /// Starts a schema whose tree is named `type_name`.
    #[inline]
    pub fn named(type_name: &'static str) -> Self {
        Self {
            type_name,
            members: Vec::new(),
            hooks: Vec::new(),
            error: None,
        }
    }

    fn push<T: MemberType>(
        mut self,
        name: &'static str,
        kind: MemberKind,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
        directives: Directives,
    ) -> Self {
        self.members
            .push(Member::new(name, kind, directives, get, set));
        self
    }

    /// Declares a field without directives.
    #[inline]
    pub fn field<T: MemberType>(self, name: &'static str, get: fn(&O) -> T, set: fn(&mut O, T)) -> Self {
        self.push(name, MemberKind::Field, get, set, Directives::new())
    }

    /// Declares a field.
    #[inline]
    pub fn field_with<T: MemberType>(
        self,
        name: &'static str,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
        directives: Directives,
    ) -> Self {
        self.push(name, MemberKind::Field, get, set, directives)
    }

    /// Declares a property without directives.
    #[inline]
    pub fn property<T: MemberType>(
        self,
        name: &'static str,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
    ) -> Self {
        self.push(name, MemberKind::Property, get, set, Directives::new())
    }

    /// Declares a property.
    #[inline]
    pub fn property_with<T: MemberType>(
        self,
        name: &'static str,
        get: fn(&O) -> T,
        set: fn(&mut O, T),
        directives: Directives,
    ) -> Self {
        self.push(name, MemberKind::Property, get, set, directives)
    }

    /// Declares every member of the embedded `B` at this point, as if `O`
    /// declared them itself. A hook of `B` runs before any hook of `O`.
    pub fn inherit<B: Persist>(mut self, base: fn(&O) -> &B, base_mut: fn(&mut O) -> &mut B) -> Self {
        match B::schema() {
            Ok(schema) => {
                let members = schema.members.into_iter();
                self.members
                    .extend(members.map(|member| member.lift(base, base_mut)));
                for hook in schema.hooks {
                    self.hooks.push(Box::new(Lifted::new(base, base_mut, hook)));
                }
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    /// Runs `O`'s [`PersistHook`] after the member pass.
    pub fn hook(mut self) -> Self
    where
        O: PersistHook,
    {
        self.hooks.push(Box::new(DirectHook::<O>::new()));
        self
    }

    /// Validates the member list.
    ///
    /// # Errors
    ///
    /// - a member name is empty, or cannot be used as a key
    /// - a section name cannot be used as a child name
    /// - two eligible members share a name
    /// - a value section has the name of an eligible tree member
    /// - an inherited schema failed
    pub fn build(self) -> Result<Schema<O>, SchemaError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        validate(self.type_name, &self.members)?;
        Ok(Schema {
            type_name: self.type_name,
            members: self.members,
            hooks: self.hooks,
        })
    }
}

// -----------------------------------------------------------------------------
// Validation

// Keys and child names must survive the block text format.
fn is_reserved(name: &str) -> bool {
    name.starts_with("//") || name.contains(['=', '{', '}', '\n', '\r'])
}

fn validate<O: 'static>(type_name: &'static str, members: &[Member<O>]) -> Result<(), SchemaError> {
    let mut names = HashSet::default();
    let mut tree_names = HashSet::default();

    for member in members {
        if member.name.is_empty() {
            return Err(SchemaError::EmptyName { type_name });
        }
        if is_reserved(member.name) {
            return Err(SchemaError::ReservedName {
                type_name,
                member: member.name,
            });
        }
        if let Some(section) = member.section()
            && is_reserved(section)
        {
            return Err(SchemaError::ReservedSection {
                type_name,
                member: member.name,
                section,
            });
        }
        if !member.is_eligible() {
            continue;
        }
        if !names.insert(member.name) {
            return Err(SchemaError::DuplicateMember {
                type_name,
                member: member.name,
            });
        }
        if member.is_tree() {
            tree_names.insert(member.name);
        }
    }

    let value_sections = members
        .iter()
        .filter(|member| member.is_eligible() && !member.is_tree())
        .filter_map(Member::section);
    for section in value_sections {
        if tree_names.contains(section) {
            return Err(SchemaError::SectionCollision { type_name, section });
        }
    }

    Ok(())
}

use alloc::boxed::Box;
use alloc::string::String;
use core::marker::PhantomData;

use kc_tree::Tree;

use crate::{CodecRegistry, ConvertError, PersistHook, Value};

// -----------------------------------------------------------------------------
// Accessor traits

pub(crate) trait ValueAccess<O>: 'static {
    fn write(&self, object: &O, codecs: &CodecRegistry) -> String;

    fn read(&self, object: &mut O, text: &str, codecs: &CodecRegistry) -> Result<(), ConvertError>;
}

pub(crate) trait TreeAccess<O>: 'static {
    /// `None` when the member holds no tree.
    fn get(&self, object: &O) -> Option<Tree>;

    fn set(&self, object: &mut O, tree: Tree);
}

pub(crate) trait HookAccess<O>: 'static {
    fn on_serialize(&self, object: &O, tree: &mut Tree);

    fn on_deserialize(&self, object: &mut O, tree: &Tree);
}

// -----------------------------------------------------------------------------
// Access

pub(crate) enum AccessKind<O> {
    Value(Box<dyn ValueAccess<O>>),
    Tree(Box<dyn TreeAccess<O>>),
}

/// Type-erased getter and setter of one member.
///
/// Built by [`MemberType::into_access`] and only usable by the serializer
/// and deserializer.
pub struct Access<O>(pub(crate) AccessKind<O>);

impl<O: 'static> Access<O> {
    #[inline]
    pub(crate) fn is_tree(&self) -> bool {
        matches!(self.0, AccessKind::Tree(_))
    }

    /// Reaches the member through `P`'s embedded `O`.
    pub(crate) fn lift<P: 'static>(
        self,
        base: fn(&P) -> &O,
        base_mut: fn(&mut P) -> &mut O,
    ) -> Access<P> {
        Access(match self.0 {
            AccessKind::Value(inner) => {
                AccessKind::Value(Box::new(Lifted::new(base, base_mut, inner)))
            }
            AccessKind::Tree(inner) => AccessKind::Tree(Box::new(Lifted::new(base, base_mut, inner))),
        })
    }
}

// -----------------------------------------------------------------------------
// MemberType

/// A type a persisted member can have.
///
/// Every [`Value`] is stored as a single entry. [`Tree`] and `Option<Tree>`
/// are stored as a nested copy of the tree, `None` being skipped with a
/// warning.
pub trait MemberType: Sized + 'static {
    #[doc(hidden)]
    fn into_access<O: 'static>(get: fn(&O) -> Self, set: fn(&mut O, Self)) -> Access<O>;
}

impl<T: Value> MemberType for T {
    fn into_access<O: 'static>(get: fn(&O) -> Self, set: fn(&mut O, Self)) -> Access<O> {
        Access(AccessKind::Value(Box::new(ValueAccessor { get, set })))
    }
}

impl MemberType for Tree {
    fn into_access<O: 'static>(get: fn(&O) -> Self, set: fn(&mut O, Self)) -> Access<O> {
        Access(AccessKind::Tree(Box::new(TreeAccessor { get, set })))
    }
}

impl MemberType for Option<Tree> {
    fn into_access<O: 'static>(get: fn(&O) -> Self, set: fn(&mut O, Self)) -> Access<O> {
        Access(AccessKind::Tree(Box::new(OptionTreeAccessor { get, set })))
    }
}

// -----------------------------------------------------------------------------
// Accessors

struct ValueAccessor<O, T> {
    get: fn(&O) -> T,
    set: fn(&mut O, T),
}

impl<O: 'static, T: Value> ValueAccess<O> for ValueAccessor<O, T> {
    fn write(&self, object: &O, codecs: &CodecRegistry) -> String {
        codecs.serialize_value(&(self.get)(object))
    }

    fn read(&self, object: &mut O, text: &str, codecs: &CodecRegistry) -> Result<(), ConvertError> {
        let existing = (self.get)(object);
        let value = codecs.deserialize_value(existing, text)?;
        (self.set)(object, value);
        Ok(())
    }
}

struct TreeAccessor<O> {
    get: fn(&O) -> Tree,
    set: fn(&mut O, Tree),
}

impl<O: 'static> TreeAccess<O> for TreeAccessor<O> {
    #[inline]
    fn get(&self, object: &O) -> Option<Tree> {
        Some((self.get)(object))
    }

    #[inline]
    fn set(&self, object: &mut O, tree: Tree) {
        (self.set)(object, tree);
    }
}

struct OptionTreeAccessor<O> {
    get: fn(&O) -> Option<Tree>,
    set: fn(&mut O, Option<Tree>),
}

impl<O: 'static> TreeAccess<O> for OptionTreeAccessor<O> {
    #[inline]
    fn get(&self, object: &O) -> Option<Tree> {
        (self.get)(object)
    }

    #[inline]
    fn set(&self, object: &mut O, tree: Tree) {
        (self.set)(object, Some(tree));
    }
}

// -----------------------------------------------------------------------------
// Hooks

pub(crate) struct DirectHook<O>(PhantomData<fn(O)>);

impl<O> DirectHook<O> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<O: PersistHook + 'static> HookAccess<O> for DirectHook<O> {
    #[inline]
    fn on_serialize(&self, object: &O, tree: &mut Tree) {
        object.on_serialize(tree);
    }

    #[inline]
    fn on_deserialize(&self, object: &mut O, tree: &Tree) {
        object.on_deserialize(tree);
    }
}

// -----------------------------------------------------------------------------
// Lifted

/// Any accessor of `B`, reached through the `B` embedded in `P`.
pub(crate) struct Lifted<P, B, A: ?Sized> {
    base: fn(&P) -> &B,
    base_mut: fn(&mut P) -> &mut B,
    inner: Box<A>,
}

impl<P, B, A: ?Sized> Lifted<P, B, A> {
    #[inline]
    pub fn new(base: fn(&P) -> &B, base_mut: fn(&mut P) -> &mut B, inner: Box<A>) -> Self {
        Self {
            base,
            base_mut,
            inner,
        }
    }
}

impl<P: 'static, B: 'static> ValueAccess<P> for Lifted<P, B, dyn ValueAccess<B>> {
    fn write(&self, object: &P, codecs: &CodecRegistry) -> String {
        self.inner.write((self.base)(object), codecs)
    }

    fn read(&self, object: &mut P, text: &str, codecs: &CodecRegistry) -> Result<(), ConvertError> {
        self.inner.read((self.base_mut)(object), text, codecs)
    }
}

impl<P: 'static, B: 'static> TreeAccess<P> for Lifted<P, B, dyn TreeAccess<B>> {
    fn get(&self, object: &P) -> Option<Tree> {
        self.inner.get((self.base)(object))
    }

    fn set(&self, object: &mut P, tree: Tree) {
        self.inner.set((self.base_mut)(object), tree);
    }
}

impl<P: 'static, B: 'static> HookAccess<P> for Lifted<P, B, dyn HookAccess<B>> {
    fn on_serialize(&self, object: &P, tree: &mut Tree) {
        self.inner.on_serialize((self.base)(object), tree);
    }

    fn on_deserialize(&self, object: &mut P, tree: &Tree) {
        self.inner.on_deserialize((self.base_mut)(object), tree);
    }
}

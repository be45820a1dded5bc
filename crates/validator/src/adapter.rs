//! Capability lookup
//!
//! An object can expose a *capability* (usually a validator) it does not
//! itself implement. [`adapt`] returns the object when it already is the
//! requested type, otherwise asks the object's [`Adapter`] mapping. A missing
//! mapping is `None`, never an error.
//!
//! ```rust,ignore
//! impl Adapter for UserService {
//!     fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
//!         (capability == TypeId::of::<UserValidator>()).then_some(&self.validator)
//!     }
//! }
//!
//! let validator: Option<&UserValidator> = adapt(&service);
//! ```

use std::any::{Any, TypeId};

/// Maps a requested capability to a component of `self`.
///
/// Implementations compare `capability` with the `TypeId` of each type they
/// can provide. The default maps nothing, which leaves only the identity
/// lookup done by [`adapt`].
pub trait Adapter {
    fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        let _ = capability;
        None
    }
}

impl<A: Adapter + ?Sized> Adapter for &A {
    fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        (**self).adapt_any(capability)
    }
}

impl<A: Adapter + ?Sized> Adapter for Box<A> {
    fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        (**self).adapt_any(capability)
    }
}

impl<A: Adapter + ?Sized> Adapter for std::sync::Arc<A> {
    fn adapt_any(&self, capability: TypeId) -> Option<&(dyn Any + 'static)> {
        (**self).adapt_any(capability)
    }
}

/// Returns `obj` as a `C`, or the `C` its [`Adapter`] provides.
pub fn adapt<C, O>(obj: &O) -> Option<&C>
where
    C: Any,
    O: Adapter + Any,
{
    if let Some(same) = (obj as &dyn Any).downcast_ref::<C>() {
        return Some(same);
    }
    obj.adapt_any(TypeId::of::<C>())?.downcast_ref::<C>()
}

/// Asks each adapter in turn and returns the first `C` provided.
///
/// Adapters are consulted through their mapping only, so an entry that is
/// itself a `C` but maps nothing is skipped.
pub fn adapt_first<'a, C>(adapters: &[&'a dyn Adapter]) -> Option<&'a C>
where
    C: Any,
{
    adapters
        .iter()
        .copied()
        .find_map(|adapter| adapter.adapt_any(TypeId::of::<C>())?.downcast_ref::<C>())
}

//! Reference plumbing shared by every object the core hands back to a
//! backend or an application.
//!
//! Resources created from a device (buffers, textures, shader objects,
//! command queues, ...) commonly need a strong reference back to the
//! device that created them, while the device itself may hold a reference
//! to some of those objects to track current binding state. Both sides
//! holding a strong reference to each other creates a cycle that neither
//! `Arc` nor any other simple refcounting scheme collects.
//!
//! [`BreakableReference`] resolves this the same way the original engine
//! does: it behaves like a strong reference as long as there are external
//! (public-API) references to the object that owns it, and can be
//! demoted to a weak reference once that external count reaches zero. The
//! owner is responsible for calling [`BreakableReference::break_strong`]
//! at that point; this module does not do the bookkeeping of "when did my
//! public refcount hit zero" for you.

use std::sync::{Arc, Weak};

/// A reference that is strong until explicitly broken, then weak.
///
/// Mirrors a cyclic-reference-breaking idiom: hold a strong `Arc<T>` by
/// default, and once it's known that the only remaining path to `T` is
/// through this reference's owner, call [`break_strong`](Self::break_strong)
/// to drop the strong half without losing the ability to resolve `T` while
/// it's still alive via other paths.
pub struct BreakableReference<T: ?Sized> {
    strong: Option<Arc<T>>,
    weak: Weak<T>,
}

impl<T: ?Sized> BreakableReference<T> {
    pub fn new(value: Arc<T>) -> Self {
        let weak = Arc::downgrade(&value);
        Self { strong: Some(value), weak }
    }

    /// Resolve the reference if the target is still alive.
    pub fn get(&self) -> Option<Arc<T>> {
        self.weak.upgrade()
    }

    /// Drop the strong half. The target stays reachable only as long as
    /// something else keeps it alive.
    pub fn break_strong(&mut self) {
        self.strong = None;
    }

    /// Re-establish a strong reference from the still-live weak half.
    ///
    /// No-op if the target has already been dropped.
    pub fn establish_strong(&mut self) {
        self.strong = self.weak.upgrade();
    }

    pub fn is_strong(&self) -> bool {
        self.strong.is_some()
    }
}

impl<T: ?Sized> Clone for BreakableReference<T> {
    fn clone(&self) -> Self {
        Self { strong: self.strong.clone(), weak: self.weak.clone() }
    }
}

impl<T: ?Sized> From<Arc<T>> for BreakableReference<T> {
    fn from(value: Arc<T>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_while_strong() {
        let target = Arc::new(42i32);
        let reference = BreakableReference::new(target.clone());
        assert_eq!(*reference.get().unwrap(), 42);
        assert!(reference.is_strong());
    }

    #[test]
    fn breaking_strong_keeps_weak_resolution_alive_with_external_owner() {
        let target = Arc::new(String::from("device"));
        let mut reference = BreakableReference::new(target.clone());
        reference.break_strong();
        assert!(!reference.is_strong());
        // Still resolvable: `target` keeps it alive externally.
        assert_eq!(reference.get().as_deref().map(String::as_str), Some("device"));
    }

    #[test]
    fn breaking_strong_drops_target_once_no_external_owner_remains() {
        let target = Arc::new(7u32);
        let mut reference = BreakableReference::new(target);
        reference.break_strong();
        assert!(reference.get().is_none());
    }

    #[test]
    fn establish_strong_extends_lifetime_again() {
        let target = Arc::new(1u8);
        let mut reference = BreakableReference::new(target.clone());
        reference.break_strong();
        reference.establish_strong();
        drop(target);
        assert!(reference.get().is_some());
    }
}

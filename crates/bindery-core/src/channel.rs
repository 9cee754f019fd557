#![forbid(unsafe_code)]

//! Publish/subscribe channel carried by every property.
//!
//! # Design
//!
//! [`Channel<T>`] keeps a list of observer callbacks. Observers are stored as
//! `Weak` function pointers; the strong side lives in the [`Subscription`]
//! handed back to the caller, so dropping the guard is enough to unsubscribe.
//!
//! # Invariants
//!
//! 1. Observers run in registration order.
//! 2. Nothing is queued or replayed: an observer only sees publishes that
//!    happen after it subscribed.
//! 3. No borrow of the channel is held while callbacks run, so a callback may
//!    subscribe, publish, or drive the owning property again.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: guards stored forever keep their callbacks alive.
//!   Dead weak references are pruned lazily during [`Channel::publish`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type CallbackRc<T> = Rc<dyn Fn(&T)>;
type CallbackWeak<T> = Weak<dyn Fn(&T)>;

/// One-to-many, synchronous change channel.
pub struct Channel<T> {
    subscribers: RefCell<Vec<CallbackWeak<T>>>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("subscriber_count", &self.subscribers.borrow().len())
            .finish()
    }
}

impl<T: 'static> Channel<T> {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. It receives every later [`publish`](Self::publish)
    /// until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        self.subscribers.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `payload` to every live observer and prune dead ones.
    pub fn publish(&self, payload: &T) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|w| w.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for cb in &callbacks {
            cb(payload);
        }
    }

    /// Number of registered observers, including dropped ones that the next
    /// publish has not pruned yet.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// RAII guard for an observer callback.
///
/// Dropping it makes the callback unreachable; the channel forgets the entry
/// on its next publish.
pub struct Subscription {
    /// Type-erased strong `Rc<dyn Fn(&T)>`.
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    /// Stop receiving notifications. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#![forbid(unsafe_code)]

//! Versioned value with change callbacks.
//!
//! A scheduler owns an [`Observable`] of its state and publishes every
//! mutation through it. View adapters subscribe once and re-read whatever
//! they render when the callback fires. Publishing an equal value does not
//! notify anyone, so callbacks only run for real changes.
//!
//! # Invariants
//!
//! 1. `version` increases by exactly 1 per value-changing publish.
//! 2. Publishing a value equal to the current one is a no-op.
//! 3. Subscribers run in registration order.
//! 4. A dropped [`Subscription`] is never called again; its slot is pruned
//!    on the next notification.
//!
//! # Failure Modes
//!
//! Callbacks receive the new value by reference and run after the internal
//! borrow is released, so a callback may read the observable. Publishing
//! from inside a callback is allowed and triggers a nested notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;
type WeakCallback<T> = Weak<dyn Fn(&T)>;

struct Slot<T> {
    value: T,
    version: u64,
    subscribers: Vec<WeakCallback<T>>,
}

/// Shared, single-threaded, versioned value.
///
/// Clones are handles to the same slot.
pub struct Observable<T> {
    slot: Rc<RefCell<Slot<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Observable")
            .field("value", &slot.value)
            .field("version", &slot.version)
            .field("subscribers", &slot.subscribers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Create an observable at version 0 with no subscribers.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.slot.borrow().value.clone()
    }

    /// Read the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.slot.borrow().value)
    }

    /// Publish `value`. Returns `true` if it differed and subscribers ran.
    pub fn set(&self, value: T) -> bool {
        {
            let mut slot = self.slot.borrow_mut();
            if slot.value == value {
                return false;
            }
            slot.value = value;
            slot.version += 1;
        }
        self.notify();
        true
    }

    /// Mutate in place; notifies only if the result differs.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.get();
        f(&mut next);
        self.set(next)
    }

    /// Register a callback for future changes.
    ///
    /// The callback stays registered while the returned guard lives.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: Callback<T> = Rc::new(callback);
        self.slot
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription {
            _keepalive: Box::new(strong),
        }
    }

    /// Number of value-changing publishes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.slot.borrow().version
    }

    /// Registered callbacks, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slot.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (value, live): (T, Vec<Callback<T>>) = {
            let mut slot = self.slot.borrow_mut();
            slot.subscribers.retain(|weak| weak.strong_count() > 0);
            let live = slot.subscribers.iter().filter_map(Weak::upgrade).collect();
            (slot.value.clone(), live)
        };
        for callback in &live {
            callback(&value);
        }
    }
}

/// Keeps a callback registered; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    _keepalive: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

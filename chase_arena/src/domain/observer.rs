// Synchronous publish/subscribe used to report kills.
//
// Observers only ever receive `&E`, never the observable that raised it, so
// subscribing or unsubscribing from inside `on_notify` cannot be expressed.
// Subscription changes go through the entity manager between notifications.

use crate::domain::entity::{EntityId, EntityKind};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub trait Observer<E> {
    fn on_notify(&self, event: &E);
}

/// Identity of a subscribed observer; two handles are the same subscriber
/// exactly when their ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A cloneable, identity-carrying reference to an observer.
pub struct ObserverHandle<E> {
    id: ObserverId,
    observer: Rc<dyn Observer<E>>,
}

impl<E> ObserverHandle<E> {
    pub fn new(observer: impl Observer<E> + 'static) -> Self {
        Self {
            id: ObserverId::next(),
            observer: Rc::new(observer),
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }
}

impl<E> Clone for ObserverHandle<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            observer: Rc::clone(&self.observer),
        }
    }
}

impl<E> fmt::Debug for ObserverHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverHandle").field("id", &self.id).finish()
    }
}

/// Set of subscribers for events of type `E`.
pub struct Observable<E> {
    observers: BTreeMap<ObserverId, Rc<dyn Observer<E>>>,
}

impl<E> Observable<E> {
    pub fn new() -> Self {
        Self {
            observers: BTreeMap::new(),
        }
    }

    /// Idempotent: adding the same handle twice keeps one subscription.
    pub fn add_observer(&mut self, handle: &ObserverHandle<E>) {
        self.observers
            .entry(handle.id)
            .or_insert_with(|| Rc::clone(&handle.observer));
    }

    /// Idempotent: removing an absent observer does nothing.
    pub fn remove_observer(&mut self, id: ObserverId) {
        self.observers.remove(&id);
    }

    pub fn is_subscribed(&self, id: ObserverId) -> bool {
        self.observers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` once to each current subscriber. No subscribers is a no-op.
    pub fn notify(&self, event: &E) {
        for observer in self.observers.values() {
            observer.on_notify(event);
        }
    }
}

impl<E> Default for Observable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Observable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.observers.keys()).finish()
    }
}

/// Who took part in a kill, captured at the moment it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTag {
    pub id: EntityId,
    pub kind: EntityKind,
}

/// Raised once per kill by the killing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillEvent {
    pub killer: EntityTag,
    pub killed: EntityTag,
}

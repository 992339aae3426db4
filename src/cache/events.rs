//! Cache Events Module
//!
//! Lifecycle events emitted by the cache engine and the per-instance
//! subscriber registry that dispatches them.

use std::collections::HashMap;
use std::fmt;

// == Event Kind ==
/// Names of the observable cache lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A key was written
    Set,
    /// A key was removed under capacity pressure
    Evict,
    /// A key was removed by a lazy expiration check
    Expire,
    /// A key was removed explicitly
    Delete,
    /// The whole cache was emptied
    Clear,
}

// == Cache Event ==
/// A cache lifecycle event together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent<K, V> {
    Set { key: K, value: V },
    Evict { key: K },
    Expire { key: K },
    Delete { key: K },
    Clear,
}

impl<K, V> CacheEvent<K, V> {
    // == Kind ==
    /// The event name this payload belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            CacheEvent::Set { .. } => EventKind::Set,
            CacheEvent::Evict { .. } => EventKind::Evict,
            CacheEvent::Expire { .. } => EventKind::Expire,
            CacheEvent::Delete { .. } => EventKind::Delete,
            CacheEvent::Clear => EventKind::Clear,
        }
    }

    // == Key ==
    /// The key the event concerns, if any (`Clear` carries none).
    pub fn key(&self) -> Option<&K> {
        match self {
            CacheEvent::Set { key, .. }
            | CacheEvent::Evict { key }
            | CacheEvent::Expire { key }
            | CacheEvent::Delete { key } => Some(key),
            CacheEvent::Clear => None,
        }
    }
}

// == Listener ==
/// A subscribed callback. `Send + Sync` so a cache holding listeners can
/// still be shared behind `Arc<RwLock<_>>`.
pub type Listener<K, V> = Box<dyn FnMut(&CacheEvent<K, V>) + Send + Sync>;

// == Subscriber Registry ==
/// Instance-owned observer list: event kind to ordered listeners.
///
/// Listeners for a kind are invoked synchronously, in registration order,
/// every time an event of that kind is emitted.
pub struct SubscriberRegistry<K, V> {
    listeners: HashMap<EventKind, Vec<Listener<K, V>>>,
}

impl<K, V> SubscriberRegistry<K, V> {
    // == Constructor ==
    /// Creates a registry with no subscriptions.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    // == Subscribe ==
    /// Appends a listener to the given event kind's dispatch list.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&CacheEvent<K, V>) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(listener));
    }

    // == Emit ==
    /// Invokes every listener registered for the event's kind, in
    /// registration order. Emitting with no listeners is a no-op.
    pub fn emit(&mut self, event: &CacheEvent<K, V>) {
        if let Some(listeners) = self.listeners.get_mut(&event.kind()) {
            for listener in listeners.iter_mut() {
                listener(event);
            }
        }
    }

    // == Listener Count ==
    /// Number of listeners registered for a kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl<K, V> Default for SubscriberRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for SubscriberRegistry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<EventKind, usize> = self
            .listeners
            .iter()
            .map(|(kind, listeners)| (*kind, listeners.len()))
            .collect();
        f.debug_struct("SubscriberRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

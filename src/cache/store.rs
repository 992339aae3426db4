//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL
//! expiration, lifecycle events and asynchronous fallback loading.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{
    CacheEntry, CacheEvent, CacheStats, EventKind, FallbackLoader, LruTracker, SubscriberRegistry,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Fixed-capacity cache with LRU eviction, TTL expiration, lifecycle
/// events and an optional async fallback loader.
///
/// Keys need equality and hashing; values are opaque. Both are cloned on
/// the paths that hand them out (event payloads, `get`), so the cache is
/// never borrowed across listener dispatch or a fallback await.
///
/// All synchronous operations take `&mut self` and run to completion, so
/// they are atomic with respect to each other; `get_async` suspends only
/// while awaiting the fallback loader. Expiration is lazy: entries are
/// checked when accessed, never by a background sweep of the engine's own.
pub struct LruCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Recency tracker driving eviction order
    lru: LruTracker<K>,
    /// Lifecycle event subscribers
    subscribers: SubscriberRegistry<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries, fixed at construction
    capacity: usize,
    /// TTL applied to entries without a per-entry override
    global_ttl: Option<Duration>,
    /// Miss-resolution source for `get_async`, shared with the caller
    fallback: Option<Arc<dyn FallbackLoader<K, V>>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache bounded to `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `capacity` is zero;
    /// no cache is created in that case.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            lru: LruTracker::new(),
            subscribers: SubscriberRegistry::new(),
            stats: CacheStats::new(),
            capacity,
            global_ttl: None,
            fallback: None,
        })
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let mut cache = Self::new(config.capacity)?;
        cache.global_ttl = config.global_ttl;
        Ok(cache)
    }

    /// Applies a cache-wide TTL to entries without a per-entry override.
    ///
    /// The duration is expected to be positive; a zero duration makes
    /// entries expire on their first access after the write.
    pub fn with_global_ttl(mut self, ttl: Duration) -> Self {
        self.global_ttl = Some(ttl);
        self
    }

    /// Attaches a fallback loader consulted on `get_async` misses.
    pub fn with_fallback(mut self, loader: Arc<dyn FallbackLoader<K, V>>) -> Self {
        self.fallback = Some(loader);
        self
    }

    // == Subscribe ==
    /// Registers a listener for one event kind.
    ///
    /// Listeners for a kind run synchronously, in registration order, on
    /// every emission of that kind.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&CacheEvent<K, V>) + Send + Sync + 'static,
    {
        self.subscribers.on(kind, listener);
    }

    // == Set ==
    /// Stores a key-value pair with an optional per-entry TTL.
    ///
    /// Re-setting an existing key replaces its entry in place (fresh value,
    /// fresh write time, fresh TTL override) and marks it most recently
    /// used; that never triggers an eviction. Inserting a genuinely new key
    /// at capacity first evicts the least recently used entry, emitting
    /// `Evict` with its key - eviction is purely capacity-driven, so the
    /// victim's own expiration state is not consulted. Emits `Set` with the
    /// key and value once the insertion has completed.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let event = CacheEvent::Set {
            key: key.clone(),
            value: value.clone(),
        };
        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
        trace!(len = self.entries.len(), overwrite = is_overwrite, "set entry");
        self.subscribers.emit(&event);
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    ///
    /// An entry found expired is removed, `Expire` is emitted with its key,
    /// and the lookup reports a miss. A successful read refreshes recency
    /// only - the write time and TTL window stay anchored to the last `set`.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(self.global_ttl) {
                self.remove_expired(key);
                self.stats.record_miss();
                return None;
            }
            let value = entry.value.clone();
            self.lru.touch(key);
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Get Async ==
    /// Retrieves a value, consulting the fallback loader on a miss.
    ///
    /// The synchronous path runs first and returns without suspending on a
    /// hit. On a miss with a loader configured, the loader is awaited
    /// exactly once - the only suspension point. A loaded value is written
    /// back via [`set`](Self::set) with no TTL override (emitting `Set` and
    /// possibly `Evict`) before being returned. A loader failure propagates
    /// unchanged to the caller; nothing is retried or cached for it.
    pub async fn get_async(&mut self, key: &K) -> Result<Option<V>> {
        if let Some(value) = self.get(key) {
            return Ok(Some(value));
        }

        let Some(loader) = self.fallback.clone() else {
            return Ok(None);
        };

        match loader.load(key).await? {
            Some(value) => {
                trace!("fallback resolved missing key");
                self.set(key.clone(), value.clone(), None);
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Has ==
    /// Checks key presence with the same lazy-expiration handling as
    /// [`get`](Self::get), but without promoting recency or returning the
    /// value. Hit/miss statistics are not touched.
    pub fn has(&mut self, key: &K) -> bool {
        let Some(entry) = self.entries.get(key) else {
            return false;
        };
        if entry.is_expired(self.global_ttl) {
            self.remove_expired(key);
            return false;
        }
        true
    }

    // == Delete ==
    /// Removes a key unconditionally - no expiration check.
    ///
    /// Emits `Delete` with the key only when an entry was actually removed.
    /// Returns whether the key was present.
    pub fn delete(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
        debug!(len = self.entries.len(), "deleted entry");
        self.subscribers.emit(&CacheEvent::Delete { key: key.clone() });
        true
    }

    // == Clear ==
    /// Removes every entry, emitting a single `Clear` event.
    ///
    /// No per-entry `Evict`/`Delete` events fire for the cleared entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        debug!("cache cleared");
        self.subscribers.emit(&CacheEvent::Clear);
    }

    // == Keys ==
    /// Point-in-time snapshot of the present keys in recency order,
    /// oldest to newest. Not-yet-lazily-expired keys are included.
    pub fn keys(&self) -> Vec<K> {
        self.lru.iter_oldest_first().cloned().collect()
    }

    // == Length ==
    /// Current entry count, including not-yet-lazily-expired entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// The fixed maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Global TTL ==
    pub fn global_ttl(&self) -> Option<Duration> {
        self.global_ttl
    }

    // == Purge Expired ==
    /// Removes every currently-expired entry, emitting `Expire` for each.
    ///
    /// This is the caller-invoked counterpart to the lazy per-access checks;
    /// the engine never runs it on its own. Returns the number of entries
    /// removed.
    pub fn purge_expired(&mut self) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.global_ttl))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in &expired_keys {
            self.remove_expired(key);
        }

        if count > 0 {
            debug!(count, "purged expired entries");
        }
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // -- Internal --

    /// Evicts the least recently used entry under capacity pressure.
    ///
    /// Always emits `Evict`, never `Expire`, even when the victim happens
    /// to be expired already.
    fn evict_oldest(&mut self) {
        if let Some(victim) = self.lru.pop_oldest() {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            self.stats.set_total_entries(self.entries.len());
            debug!(len = self.entries.len(), "evicted least recently used entry");
            self.subscribers.emit(&CacheEvent::Evict { key: victim });
        }
    }

    /// Removes an entry found expired by a lazy check and notifies.
    fn remove_expired(&mut self, key: &K) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.record_expiration();
        self.stats.set_total_entries(self.entries.len());
        debug!(len = self.entries.len(), "removed expired entry");
        self.subscribers.emit(&CacheEvent::Expire { key: key.clone() });
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .field("global_ttl", &self.global_ttl)
            .field("has_fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

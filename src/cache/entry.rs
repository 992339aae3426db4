//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of the last write (set on every `set`, never touched by reads)
    pub created_at: Instant,
    /// Per-entry TTL override, None = fall back to the cache-wide TTL
    pub ttl: Option<Duration>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with an optional per-entry TTL.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired under the given cache-wide TTL.
    ///
    /// A per-entry TTL, when present, fully overrides the cache-wide TTL;
    /// the two are never combined. With neither set the entry never expires.
    ///
    /// An entry is expired once strictly more than its TTL has elapsed
    /// since the last write.
    pub fn is_expired(&self, global_ttl: Option<Duration>) -> bool {
        match self.ttl.or(global_ttl) {
            Some(ttl) => self.created_at.elapsed() > ttl,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime under the given cache-wide TTL.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry's TTL has elapsed
    /// - `Some(remaining)` if the entry has a TTL that hasn't elapsed
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, global_ttl: Option<Duration>) -> Option<Duration> {
        self.ttl
            .or(global_ttl)
            .map(|ttl| ttl.saturating_sub(self.created_at.elapsed()))
    }
}

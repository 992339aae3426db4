//! Fallback Loader Module
//!
//! The narrow async interface to an external source consulted on cache
//! misses during `get_async`.

use async_trait::async_trait;

// == Fallback Loader ==
/// An asynchronous lookup consulted only when `get_async` misses.
///
/// The engine awaits `load` at most once per miss. `Ok(Some(value))` is
/// written back into the cache; `Ok(None)` means the source has no value
/// for the key and nothing is inserted. Errors propagate unchanged to the
/// `get_async` caller and are neither retried nor cached.
#[async_trait]
pub trait FallbackLoader<K, V>: Send + Sync {
    /// Resolves a missing key against the backing source.
    async fn load(&self, key: &K) -> anyhow::Result<Option<V>>;
}

//! A fixed-capacity in-memory LRU cache
//!
//! Provides a generic key/value cache with least-recently-used eviction,
//! per-entry and cache-wide TTL expiration, observable lifecycle events
//! and an optional asynchronous fallback loader for misses.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEntry, CacheEvent, CacheStats, EventKind, FallbackLoader, LruCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_purge_task;

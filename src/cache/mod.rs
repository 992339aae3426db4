//! Cache Module
//!
//! Provides in-memory caching with LRU eviction, TTL expiration,
//! lifecycle events and async fallback loading.

mod entry;
mod events;
mod fallback;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use events::{CacheEvent, EventKind, Listener, SubscriberRegistry};
pub use fallback::FallbackLoader;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::LruCache;

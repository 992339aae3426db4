//! TTL Purge Task
//!
//! Optional background task that periodically sweeps expired cache
//! entries. The engine itself never starts one - expiration stays lazy
//! unless a caller opts in here.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;

/// Spawns a background task that periodically purges expired entries.
///
/// The task loops forever, sleeping for `interval` between sweeps and
/// taking a write lock for each one. Every removed entry goes through the
/// cache's normal expiration path, so `Expire` events fire for each key.
///
/// Returns the JoinHandle for the spawned task, which the caller can abort
/// during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(LruCache::new(1000)?));
/// let purge_handle = spawn_purge_task(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// purge_handle.abort();
/// ```
pub fn spawn_purge_task<K, V>(
    cache: Arc<RwLock<LruCache<K, V>>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL purge task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.purge_expired()
            };

            if removed > 0 {
                info!(removed, "TTL purge removed expired entries");
            } else {
                debug!("TTL purge found no expired entries");
            }
        }
    })
}

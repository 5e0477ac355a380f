use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use super::Cache;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    /// bincode-encoded value
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process cache backed by a sharded [`DashMap`]
///
/// A background task sweeps expired entries every minute; reads also drop
/// an expired entry as soon as they see it. Must be created inside a tokio
/// runtime.
#[derive(Debug)]
pub struct LocalCache {
    store: Arc<DashMap<String, CacheEntry>>,
    cleanup_handle: Option<JoinHandle<()>>,
}

impl LocalCache {
    pub fn new() -> Self {
        Self::with_shard_count((num_cpus::get() * 4).next_power_of_two())
    }

    /// `shard_count` must be a power of two.
    pub fn with_shard_count(shard_count: usize) -> Self {
        let store = Arc::new(DashMap::with_shard_amount(shard_count));
        let cleanup_handle = Self::start_cleanup_task(Arc::clone(&store));

        Self {
            store,
            cleanup_handle: Some(cleanup_handle),
        }
    }

    fn start_cleanup_task(store: Arc<DashMap<String, CacheEntry>>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

            loop {
                interval.tick().await;

                let before = store.len();
                store.retain(|_, entry| !entry.is_expired());
                let removed = before.saturating_sub(store.len());

                if removed > 0 {
                    ::tracing::debug!(removed, "Swept expired cache entries");
                }
            }
        })
    }
}

impl Default for LocalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocalCache {
    fn drop(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
        }
    }
}

#[async_trait]
impl Cache for LocalCache {
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send,
    {
        let Some(entry) = self.store.get(key) else {
            return Ok(None);
        };

        if entry.is_expired() {
            drop(entry);
            self.store.remove(key);
            return Ok(None);
        }

        let value: V =
            bincode::deserialize(&entry.data).context("Failed to deserialize cached value")?;

        Ok(Some(value))
    }

    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync,
    {
        let data = bincode::serialize(value).context("Failed to serialize value")?;

        self.store.insert(
            key.to_string(),
            CacheEntry {
                data,
                expires_at: Instant::now() + ttl,
            },
        );

        Ok(())
    }
}

pub mod local;

pub use local::LocalCache;

use std::fmt::Debug;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Key-value cache with per-entry expiry
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// `None` when the key is absent or expired
    async fn get<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: for<'de> Deserialize<'de> + Send;

    async fn set<V>(&self, key: &str, value: &V, ttl: Duration) -> Result<()>
    where
        V: Serialize + Send + Sync;
}

pub struct CacheKey;

impl CacheKey {
    /// Key for a verified Basic credential pair.
    ///
    /// Only a SHA-256 fingerprint of `username:password` is kept, never the
    /// password itself.
    pub fn credentials(username: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(username.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());

        format!("credentials:{}", hex::encode(hasher.finalize()))
    }
}

//! Signing-key cache boundary.
//!
//! The cache maps a key identifier (`kid`) to the normalized textual
//! signing key resolved for it. Entries are written once on first
//! resolution and never expire: the provider does not reissue a different
//! key under an identifier it has already published, so an entry is
//! immutable for the lifetime of the process.
//!
//! A miss is an explicit `None`, never an error. Write failures surface as
//! [`CacheWriteError`] so callers can log and continue; a failed write must
//! never fail the authentication that produced the key.

use crate::auth::keys::SigningKey;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure writing a resolved key into the cache.
///
/// Non-fatal by contract: the freshly resolved key is still valid for the
/// current request even when it could not be stored.
#[derive(Debug, Error)]
#[error("cache write failed: {0}")]
pub struct CacheWriteError(pub String);

/// Key-value store for resolved signing keys, addressed by `kid`.
///
/// Implementations must tolerate concurrent reads and concurrent duplicate
/// writes for the same identifier; losing a duplicate-write race is
/// acceptable because both writers hold identical content.
#[async_trait]
pub trait KeyCache: Send + Sync {
    /// Look up the signing key cached under `kid`.
    ///
    /// Returns `None` on a miss. Implementations backed by a fallible
    /// store degrade read failures to a logged miss rather than erroring.
    async fn get(&self, kid: &str) -> Option<SigningKey>;

    /// Store the signing key resolved for `kid`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheWriteError`] when the underlying store rejects the
    /// write. Callers treat this as non-fatal.
    async fn put(&self, kid: &str, key: &SigningKey) -> Result<(), CacheWriteError>;
}

/// In-process key cache.
#[derive(Default)]
pub struct MemoryKeyCache {
    keys: RwLock<HashMap<String, SigningKey>>,
}

impl MemoryKeyCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyCache for MemoryKeyCache {
    async fn get(&self, kid: &str) -> Option<SigningKey> {
        let keys = self.keys.read().await;
        let hit = keys.get(kid).cloned();
        if hit.is_some() {
            tracing::debug!(target: "authorizer.cache", kid = %kid, "signing key cache hit");
        }
        hit
    }

    async fn put(&self, kid: &str, key: &SigningKey) -> Result<(), CacheWriteError> {
        let mut keys = self.keys.write().await;
        keys.insert(kid.to_string(), key.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_key(text: &str) -> SigningKey {
        SigningKey::from_pem(text)
    }

    #[tokio::test]
    async fn test_get_on_empty_cache_is_none() {
        let cache = MemoryKeyCache::new();
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let cache = MemoryKeyCache::new();
        let key = test_key("-----BEGIN CERTIFICATE-----\nabc\n-----END CERTIFICATE-----\n");

        cache.put("key-01", &key).await.unwrap();

        let cached = cache.get("key-01").await.expect("entry should exist");
        assert_eq!(cached.as_str(), key.as_str());
    }

    #[tokio::test]
    async fn test_duplicate_write_is_idempotent() {
        let cache = MemoryKeyCache::new();
        let key = test_key("same-content");

        cache.put("key-01", &key).await.unwrap();
        cache.put("key-01", &key).await.unwrap();

        assert_eq!(cache.get("key-01").await.unwrap().as_str(), "same-content");
    }

    #[tokio::test]
    async fn test_concurrent_writes_do_not_corrupt() {
        let cache = Arc::new(MemoryKeyCache::new());
        let key = test_key("shared-key");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                cache.put("key-01", &key).await.unwrap();
                cache.get("key-01").await
            }));
        }

        for handle in handles {
            let got = handle.await.unwrap();
            if let Some(k) = got {
                assert_eq!(k.as_str(), "shared-key");
            }
        }

        assert_eq!(cache.get("key-01").await.unwrap().as_str(), "shared-key");
    }

    #[tokio::test]
    async fn test_entries_are_isolated_by_kid() {
        let cache = MemoryKeyCache::new();
        cache.put("key-01", &test_key("first")).await.unwrap();
        cache.put("key-02", &test_key("second")).await.unwrap();

        assert_eq!(cache.get("key-01").await.unwrap().as_str(), "first");
        assert_eq!(cache.get("key-02").await.unwrap().as_str(), "second");
    }
}

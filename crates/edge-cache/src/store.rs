//! Key-value backend trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{CacheError, CacheResult};

/// Key-value backend with per-entry expiry.
///
/// Values are opaque text; callers own the encoding.
#[async_trait(?Send)]
pub trait KvStore {
    /// Get a value, or `None` if absent or expired.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store a value that expires after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}

#[async_trait(?Send)]
impl<S: KvStore + ?Sized> KvStore for &S {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        (**self).set_ex(key, value, ttl).await
    }
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-memory backend (for development/testing).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryStore {
    /// Create a new in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CacheResult<std::sync::MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Storage(format!("lock poisoned: {}", e)))
    }
}

#[async_trait(?Send)]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.lock()?.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryStore::new();
        store
            .set_ex("firebase-cache-about", "[]", Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(
            store.get("firebase-cache-about").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_overwrite() {
        let store = InMemoryStore::new();
        store.set_ex("k", "one", Duration::from_secs(60)).await.unwrap();
        store.set_ex("k", "two", Duration::from_secs(60)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("two".to_string()));
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let store = InMemoryStore::new();
        store.set_ex("k", "v", Duration::ZERO).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    async fn write_through<S: KvStore>(store: S) {
        store.set_ex("k", "v", Duration::from_secs(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_reference_forwards() {
        let store = InMemoryStore::new();
        write_through(&store).await;
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }
}

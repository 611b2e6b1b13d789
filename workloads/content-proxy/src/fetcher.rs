//! Cache-aside loading of a collection.

use edge_sdk::edge_cache::{CacheKey, CachePolicy, CacheStatus, KvStore};
use edge_sdk::edge_core::{marks, TimingContext};
use edge_sdk::edge_data::{FirestoreClient, HttpClient};
use edge_sdk::edge_observability::StructuredLogger;
use serde::Serialize;
use serde_json::Value;

use crate::ProxyError;

/// Where a payload was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataSource {
    #[serde(rename = "redis-cache")]
    Cache,
    #[serde(rename = "firebase")]
    Upstream,
}

impl DataSource {
    pub fn cache_status(self) -> CacheStatus {
        match self {
            Self::Cache => CacheStatus::Hit,
            Self::Upstream => CacheStatus::Miss,
        }
    }
}

/// Body of a successful collection response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPayload {
    pub from: DataSource,
    pub collection: String,
    pub data: Value,
}

/// Loads collections from the cache, falling back to Firestore.
pub struct CollectionFetcher<S, C> {
    store: S,
    firestore: FirestoreClient<C>,
    policy: CachePolicy,
}

impl<S: KvStore, C: HttpClient> CollectionFetcher<S, C> {
    pub fn new(store: S, firestore: FirestoreClient<C>) -> Self {
        Self {
            store,
            firestore,
            policy: CachePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Serve `collection` from the cache, or load it upstream and write it back.
    ///
    /// A cached value decoding to `null`, `false`, `0` or `""` counts as a
    /// miss. The write-back happens whatever the upstream status was.
    pub async fn fetch(
        &self,
        collection: &str,
        timing: &mut TimingContext,
        logger: &StructuredLogger,
    ) -> Result<CollectionPayload, ProxyError> {
        let key = CacheKey::for_collection(collection);

        timing.mark(marks::CACHE_LOOKUP);
        let cached = self.store.get(key.as_str()).await?;

        if let Some(data) = cached.map(|text| decode_cached(&text)).filter(is_present) {
            logger
                .debug_builder("cache hit")
                .field("key", key.as_str())
                .emit();
            return Ok(CollectionPayload {
                from: DataSource::Cache,
                collection: collection.to_string(),
                data,
            });
        }

        logger
            .debug_builder("cache miss")
            .field("key", key.as_str())
            .emit();

        timing.mark(marks::UPSTREAM_START);
        let documents = self.firestore.list_documents(collection).await?;
        timing.mark(marks::UPSTREAM_DONE);

        logger
            .info_builder("fetched from firestore")
            .field("collection", collection)
            .field_i64("documents", documents.len() as i64)
            .duration_ms(
                "upstream_ms",
                timing
                    .between(marks::UPSTREAM_START, marks::UPSTREAM_DONE)
                    .unwrap_or_default(),
            )
            .emit();

        let data = serde_json::to_value(&documents)?;
        let encoded = serde_json::to_string(&data)?;
        self.store
            .set_ex(key.as_str(), &encoded, self.policy.ttl)
            .await?;
        timing.mark(marks::CACHE_WRITE);

        logger
            .debug_builder("cache write")
            .field("key", key.as_str())
            .field_i64("ttl_secs", self.policy.ttl_secs() as i64)
            .emit();

        Ok(CollectionPayload {
            from: DataSource::Upstream,
            collection: collection.to_string(),
            data,
        })
    }
}

// Entries written by other producers may not be JSON; they pass through as a string.
fn decode_cached(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => true,
    }
}

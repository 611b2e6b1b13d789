//! Cache key composition.

use serde::{Deserialize, Serialize};

/// Prefix shared by every collection entry.
pub const COLLECTION_KEY_PREFIX: &str = "firebase-cache-";

/// A cache key uniquely identifying a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey {
    key: String,
}

impl CacheKey {
    /// Key for a collection: the fixed prefix followed by the name.
    pub fn for_collection(collection: &str) -> Self {
        Self {
            key: format!("{}{}", COLLECTION_KEY_PREFIX, collection),
        }
    }

    /// Get the key string.
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

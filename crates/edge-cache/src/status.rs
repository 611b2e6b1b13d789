//! Cache lookup status.

use serde::{Deserialize, Serialize};

/// Header names for cache debugging.
pub mod header_names {
    /// Cache status header (HIT, MISS).
    pub const X_CACHE_STATUS: &str = "x-cache-status";
    /// Request ID for tracing.
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Status of a cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from the cache.
    Hit,
    /// Loaded from the source and written back.
    Miss,
}

impl CacheStatus {
    /// Header value for `X-Cache-Status`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

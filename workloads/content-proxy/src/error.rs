//! Errors raised while serving a request.

use edge_sdk::edge_cache::CacheError;
use edge_sdk::edge_core::ConfigError;
use edge_sdk::edge_data::FetchError;

/// Failure inside the proxy. Every variant maps to a 500 at the router.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("upstream error: {0}")]
    Upstream(#[from] FetchError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

//! Key-value caching for the content edge proxy.
//!
//! This crate provides:
//! - `CacheKey` - Deterministic, prefixed collection keys
//! - `CachePolicy` - Fixed time-to-live for written entries
//! - `KvStore` - Async get / set-with-expiry backend trait
//! - `UpstashStore` - Redis over the Upstash REST API
//! - `InMemoryStore` - Process-local backend for development and tests
//!
//! # Example
//!
//! ```ignore
//! use edge_cache::{CacheKey, CachePolicy, KvStore, UpstashStore};
//!
//! let store = UpstashStore::new(client, url, token);
//! let key = CacheKey::for_collection("projects");
//!
//! if store.get(key.as_str()).await?.is_none() {
//!     store.set_ex(key.as_str(), "[]", CachePolicy::default().ttl).await?;
//! }
//! ```

mod error;
mod key;
mod policy;
mod status;
mod store;
mod upstash;

pub use error::*;
pub use key::*;
pub use policy::*;
pub use status::*;
pub use store::*;
pub use upstash::*;

//! Cache-aside content proxy.
//!
//! Serves the portfolio collections (`about`, `experiences`, `projects`,
//! `skills`) as JSON:
//! - `OPTIONS` on any path answers 204 with CORS headers
//! - `GET /<collection>` reads `firebase-cache-<collection>` from Upstash Redis
//! - on a miss the collection is listed from Firestore, normalized to plain
//!   JSON and written back with a ten minute expiry
//!
//! The Spin entry point lives in `component` and is only built for wasm32.

mod error;
mod fetcher;
pub mod response;
mod router;

#[cfg(target_arch = "wasm32")]
mod component;

#[cfg(test)]
mod test_support;

pub use error::ProxyError;
pub use fetcher::{CollectionFetcher, CollectionPayload, DataSource};
pub use router::{ContentProxy, SERVICE_NAME};

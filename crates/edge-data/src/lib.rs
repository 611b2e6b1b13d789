//! Outbound HTTP transport and document store access.
//!
//! This crate provides:
//! - `HttpClient` - Transport trait, backed by Spin's outbound HTTP on wasm32
//! - `HttpRequest` / `HttpResponse` - Owned request and response values
//! - `FirestoreClient` - Collection listing against the Firestore REST API
//! - `normalize_value` / `convert_document` - Tagged value normalization

mod client;
mod error;
mod firestore;
mod normalize;
mod request;
mod response;

pub use client::*;
pub use error::FetchError;
pub use firestore::*;
pub use normalize::*;
pub use request::{HttpRequest, Method};
pub use response::HttpResponse;

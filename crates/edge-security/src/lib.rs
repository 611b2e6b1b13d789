//! Request admission policy for the content edge proxy.
//!
//! This crate provides:
//! - `CollectionAllowlist` - Exact-match filtering of requested collections
//! - `CorsPolicy` - Fixed cross-origin headers and preflight detection
//!
//! # Example
//!
//! ```ignore
//! use edge_security::{presets, CorsPolicy};
//!
//! let allowlist = presets::content_sections();
//! let collection = allowlist.resolve("/projects")?;
//!
//! let mut headers = http::HeaderMap::new();
//! CorsPolicy::default().apply(&mut headers);
//! ```

mod allowlist;
mod cors;

pub use allowlist::*;
pub use cors::*;

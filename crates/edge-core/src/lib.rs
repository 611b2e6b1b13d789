//! Core abstractions for the content edge proxy.
//!
//! This crate provides the fundamental types:
//! - `ProxyConfig` - Configuration sourced from the hosting environment
//! - `RequestContext` - Per-request method, path and identifier
//! - `TimingContext` - Request timing marks for observability

mod config;
mod context;
mod lifecycle;

pub use config::*;
pub use context::*;
pub use lifecycle::*;

//! Observability for the content edge proxy.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `LogSettings` - Level and format parsed from proxy configuration

mod logging;

pub use logging::*;

// Re-export RequestId and TimingContext from edge-core for convenience
pub use edge_core::{RequestId, TimingContext};

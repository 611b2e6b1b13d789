//! Cache error types.

use edge_data::FetchError;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    /// The backend rejected a command.
    #[error("command {command} failed: {message}")]
    Command { command: String, message: String },

    /// Backend storage error.
    #[error("storage error: {0}")]
    Storage(String),
}

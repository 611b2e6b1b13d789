//! Inbound collection allowlist.

use serde::{Deserialize, Serialize};

/// Result type for allowlist operations.
pub type AllowlistResult<T> = Result<T, AllowlistError>;

/// Errors from allowlist operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllowlistError {
    #[error("collection not allowed: {0:?}")]
    CollectionNotAllowed(String),
}

/// Fixed set of collection names a proxy will serve.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionAllowlist {
    collections: Vec<String>,
}

impl CollectionAllowlist {
    /// Create an empty allowlist (rejects everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow a collection.
    pub fn allow(mut self, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        if !self.collections.contains(&collection) {
            self.collections.push(collection);
        }
        self
    }

    /// Allow several collections.
    pub fn allow_all(self, collections: &[&str]) -> Self {
        collections.iter().fold(self, |list, c| list.allow(*c))
    }

    /// Check whether a collection name is allowed.
    pub fn contains(&self, collection: &str) -> bool {
        self.collections.iter().any(|c| c == collection)
    }

    /// Resolve a request path to an allowed collection name.
    ///
    /// One leading `/` is stripped; the remainder must match exactly.
    pub fn resolve<'a>(&self, path: &'a str) -> AllowlistResult<&'a str> {
        let name = path.strip_prefix('/').unwrap_or(path);
        if self.contains(name) {
            Ok(name)
        } else {
            Err(AllowlistError::CollectionNotAllowed(name.to_string()))
        }
    }
}

/// Pre-configured allowlists.
pub mod presets {
    use super::CollectionAllowlist;

    /// Portfolio site sections.
    pub const CONTENT_SECTIONS: [&str; 4] = ["about", "experiences", "projects", "skills"];

    /// Allowlist serving the portfolio site sections.
    pub fn content_sections() -> CollectionAllowlist {
        CollectionAllowlist::new().allow_all(&CONTENT_SECTIONS)
    }
}

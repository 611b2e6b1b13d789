//! Cache write policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lifetime of collection entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Expiry applied to every cache write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Time-to-live of written entries.
    pub ttl: Duration,
}

impl CachePolicy {
    /// Policy with a fixed TTL.
    pub fn fixed(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// TTL in whole seconds, as sent to the backend.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_TTL)
    }
}

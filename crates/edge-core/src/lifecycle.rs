//! Request lifecycle timing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Well-known timing marks recorded by the proxy.
pub mod marks {
    pub const CACHE_LOOKUP: &str = "cache_lookup";
    pub const UPSTREAM_START: &str = "upstream_start";
    pub const UPSTREAM_DONE: &str = "upstream_done";
    pub const CACHE_WRITE: &str = "cache_write";
}

/// Timing context for observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Offset of a mark from the start of the request.
    pub fn offset(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Time between two recorded marks.
    pub fn between(&self, from: &str, to: &str) -> Option<Duration> {
        let from = self.marks.get(from)?;
        let to = self.marks.get(to)?;
        Some(to.saturating_duration_since(*from))
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

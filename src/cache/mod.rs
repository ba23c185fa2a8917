//! Two-tier cache for repository lookups
//!
//! An in-process memory tier sits in front of a SQLite-backed persistent tier.
//! Each tier has its own freshness window; see [`CacheTier`].

pub mod key;
pub mod layer;
pub mod storage;

use chrono::Duration;
use serde::Serialize;

/// Cache tier with its own freshness window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheTier {
    /// Process-lifetime map, served for 1 hour
    Memory,
    /// On-disk store surviving restarts, served for 24 hours
    Persistent,
}

impl CacheTier {
    /// Maximum age at which an entry of this tier may be served
    pub fn window(&self) -> Duration {
        match self {
            CacheTier::Memory => Duration::hours(1),
            CacheTier::Persistent => Duration::hours(24),
        }
    }

    /// Whether an entry of age `age` is still servable from this tier
    pub fn is_fresh(&self, age: Duration) -> bool {
        age < self.window()
    }
}

// Re-export main types
pub use key::cache_key;
pub use layer::{CacheEntry, CacheLayer};
pub use storage::{PersistentStore, SqliteStore, VolatileStore};

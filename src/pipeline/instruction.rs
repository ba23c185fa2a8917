//! Terminal result of a lookup, ready for rendering

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::Repository;
use crate::client::rate_limit::Advisory;

/// What the renderer should show for one submission.
///
/// Serialized with a `status` tag for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Blank submission; nothing was looked up
    EmptyInput,

    /// Served from cache without touching the network
    ServeCached {
        username: String,
        repositories: Vec<Repository>,
        cached_at: DateTime<Utc>,
    },

    /// The account does not exist
    NotFound { username: String },

    /// Rate limited, showing the cached copy instead
    ServeStale {
        username: String,
        repositories: Vec<Repository>,
        cached_at: DateTime<Utc>,
        advisory: Advisory,
    },

    /// Rate limited with nothing cached
    RateLimitBlocked { username: String, advisory: Advisory },

    /// Any other failure, message shown verbatim
    Error { username: String, message: String },

    /// The account exists but has no public repositories
    NoRepos { username: String },

    /// Freshly fetched
    ServeFresh {
        username: String,
        repositories: Vec<Repository>,
    },
}

impl RenderInstruction {
    /// Repositories to list, if this instruction shows any
    #[allow(dead_code)]
    pub fn repositories(&self) -> Option<&[Repository]> {
        match self {
            RenderInstruction::ServeCached { repositories, .. }
            | RenderInstruction::ServeStale { repositories, .. }
            | RenderInstruction::ServeFresh { repositories, .. } => Some(repositories),
            _ => None,
        }
    }

    /// Whether the instruction reports a failure to the user
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RenderInstruction::EmptyInput
                | RenderInstruction::NotFound { .. }
                | RenderInstruction::RateLimitBlocked { .. }
                | RenderInstruction::Error { .. }
        )
    }
}

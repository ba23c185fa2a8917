//! User models

use serde::{Deserialize, Serialize};

/// Subset of `GET /users/{username}` used for the existence check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Login name as GitHub spells it
    pub login: String,

    /// Number of public repositories (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u64>,
}

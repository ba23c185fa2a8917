//! GitHub API data models
//!
//! Wire types returned by the GitHub REST API, organized by resource type.

mod repo;
mod user;

pub use repo::{Repository, language_names};
pub use user::UserProfile;

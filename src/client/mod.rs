//! GitHub API client

use async_trait::async_trait;

use crate::error::Result;

pub mod fetcher;
pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod parallel;
pub mod rate_limit;

pub use fetcher::{FetchOutcome, RepositoryFetcher};
pub use github::GitHubClient;
#[cfg(test)]
pub use mock::MockGitHubClient;
pub use models::{Repository, UserProfile};

/// Read-only GitHub REST operations used by the repository pipeline.
///
/// Implementations report HTTP denials as [`crate::error::ApiError`] values:
/// 404 as `NotFound`, 403/429 as `RateLimited`, any other non-success status
/// as `Status`.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Existence check: `GET /users/{username}`
    async fn get_user(&self, username: &str) -> Result<UserProfile>;

    /// First page of `GET /users/{username}/repos`, languages left empty
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>>;

    /// Language names from a repository's `languages_url`
    async fn list_languages(&self, languages_url: &str) -> Result<Vec<String>>;
}

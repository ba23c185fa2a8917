//! Mock GitHub API client for testing
//!
//! Provides a mock implementation of [`GitHubApi`] for unit testing without
//! making real API calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{GitHubApi, Repository, UserProfile};
use crate::error::{ApiError, Result};

/// Languages URL the mock associates with a repository name
pub fn languages_url_for(name: &str) -> String {
    format!("https://api.github.com/repos/octocat/{}/languages", name)
}

/// Repository fixture with no description and no languages
pub fn sample_repo(name: &str) -> Repository {
    Repository {
        name: name.to_string(),
        description: None,
        star_count: 3,
        watcher_count: 1,
        html_url: format!("https://github.com/octocat/{}", name),
        languages_url: languages_url_for(name),
        languages: Vec::new(),
    }
}

/// Mock API client for testing.
///
/// Configure responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockGitHubClient::new()
///     .with_repos(vec![sample_repo("alpha")])
///     .with_languages("alpha", vec!["Rust"]);
/// ```
#[derive(Default)]
pub struct MockGitHubClient {
    /// Error returned by get_user (None = user exists)
    user_error: Option<ApiError>,
    /// Repositories returned by list_repos
    repos: Vec<Repository>,
    /// Error returned by list_repos
    repos_error: Option<ApiError>,
    /// Languages keyed by languages_url; Err entries fail the call
    languages: HashMap<String, std::result::Result<Vec<String>, ApiError>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get_user: usize,
    pub list_repos: usize,
    pub list_languages: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get_user + self.list_repos + self.list_languages
    }
}

impl MockGitHubClient {
    /// Create a new mock client: the user exists and has no repositories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the existence check return 404.
    pub fn with_missing_user(self) -> Self {
        self.with_user_error(ApiError::NotFound("/users".to_string()))
    }

    /// Make the existence check fail as rate limited.
    pub fn with_rate_limit(self, reset_at: DateTime<Utc>) -> Self {
        self.with_user_error(ApiError::RateLimited { reset_at })
    }

    /// Make the existence check fail with an arbitrary error.
    pub fn with_user_error(mut self, err: ApiError) -> Self {
        self.user_error = Some(err);
        self
    }

    /// Configure repositories to return from list_repos.
    pub fn with_repos(mut self, repos: Vec<Repository>) -> Self {
        self.repos = repos;
        self
    }

    /// Make list_repos fail.
    pub fn with_repos_error(mut self, err: ApiError) -> Self {
        self.repos_error = Some(err);
        self
    }

    /// Configure languages for the repository called `name`.
    pub fn with_languages(mut self, name: &str, languages: Vec<&str>) -> Self {
        self.languages.insert(
            languages_url_for(name),
            Ok(languages.into_iter().map(String::from).collect()),
        );
        self
    }

    /// Make the languages call for the repository called `name` fail.
    pub fn with_language_failure(mut self, name: &str) -> Self {
        self.languages
            .insert(languages_url_for(name), Err(ApiError::Status(500)));
        self
    }

    /// Snapshot of the call counters.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }
}

#[async_trait]
impl GitHubApi for MockGitHubClient {
    async fn get_user(&self, username: &str) -> Result<UserProfile> {
        self.call_count.lock().await.get_user += 1;

        match self.user_error {
            Some(ref err) => Err(err.clone().into()),
            None => Ok(UserProfile {
                login: username.to_string(),
                public_repos: Some(self.repos.len() as u64),
            }),
        }
    }

    async fn list_repos(&self, _username: &str) -> Result<Vec<Repository>> {
        self.call_count.lock().await.list_repos += 1;

        match self.repos_error {
            Some(ref err) => Err(err.clone().into()),
            None => Ok(self.repos.clone()),
        }
    }

    async fn list_languages(&self, languages_url: &str) -> Result<Vec<String>> {
        self.call_count.lock().await.list_languages += 1;

        match self.languages.get(languages_url) {
            Some(Ok(languages)) => Ok(languages.clone()),
            Some(Err(err)) => Err(err.clone().into()),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_every_call() {
        let mock = MockGitHubClient::new().with_repos(vec![sample_repo("alpha")]);

        mock.get_user("octocat").await.unwrap();
        mock.list_repos("octocat").await.unwrap();
        mock.list_languages(&languages_url_for("alpha")).await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.get_user, 1);
        assert_eq!(counts.list_repos, 1);
        assert_eq!(counts.list_languages, 1);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_configured_language_failure() {
        let mock = MockGitHubClient::new().with_language_failure("alpha");

        assert!(mock.list_languages(&languages_url_for("alpha")).await.is_err());
    }
}

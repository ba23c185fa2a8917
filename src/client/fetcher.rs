//! Network side of a repository lookup
//!
//! Sequences the existence check, the repository list, and the per-repository
//! language requests, and classifies the result into a [`FetchOutcome`].

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::parallel::fetch_indexed;
use super::{GitHubApi, Repository};
use crate::error::{ApiError, Error};

/// Default bound on concurrent language requests
pub const DEFAULT_MAX_CONCURRENT_LANGUAGES: usize = 8;

/// Discriminated result of a network fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The user exists; repositories carry their languages
    Found(Vec<Repository>),
    /// The existence check returned 404
    UserNotFound,
    /// The API denied the request until `reset_at`
    RateLimited(DateTime<Utc>),
    /// Any other failure, with a message fit for display
    TransientError(String),
}

/// Classify a failed existence or list call
fn classify(err: Error) -> FetchOutcome {
    match err {
        Error::Api(ApiError::NotFound(_)) => FetchOutcome::UserNotFound,
        Error::Api(ApiError::RateLimited { reset_at }) => FetchOutcome::RateLimited(reset_at),
        other => FetchOutcome::TransientError(other.to_string()),
    }
}

/// Fetches a user's repositories and their languages
pub struct RepositoryFetcher<C: GitHubApi> {
    api: C,
    max_concurrent: usize,
}

impl<C: GitHubApi> RepositoryFetcher<C> {
    /// Create a fetcher with the default language concurrency
    pub fn new(api: C) -> Self {
        Self::with_concurrency(api, DEFAULT_MAX_CONCURRENT_LANGUAGES)
    }

    /// Create a fetcher issuing at most `max_concurrent` language requests at once
    pub fn with_concurrency(api: C, max_concurrent: usize) -> Self {
        Self {
            api,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Underlying API client
    #[allow(dead_code)]
    pub fn api(&self) -> &C {
        &self.api
    }

    /// Fetch everything needed to display `username`'s repositories.
    ///
    /// The existence check runs first so an unknown user costs one request.
    /// Language failures are isolated to their repository.
    pub async fn fetch_user_repositories(&self, username: &str) -> FetchOutcome {
        if let Err(err) = self.api.get_user(username).await {
            debug!("Existence check for {} failed: {}", username, err);
            return classify(err);
        }

        let repositories = match self.api.list_repos(username).await {
            Ok(repos) => repos,
            Err(err) => {
                debug!("Repository list for {} failed: {}", username, err);
                // A 404 here means the account vanished between calls
                return classify(err);
            }
        };

        debug!("Fetched {} repositories for {}", repositories.len(), username);
        FetchOutcome::Found(self.attach_languages(repositories).await)
    }

    /// Fill in `languages` for every repository, one request each
    async fn attach_languages(&self, mut repositories: Vec<Repository>) -> Vec<Repository> {
        let urls: Vec<String> = repositories
            .iter()
            .map(|r| r.languages_url.clone())
            .collect();

        let results = fetch_indexed(
            urls,
            |url| async move { self.api.list_languages(&url).await },
            self.max_concurrent,
        )
        .await;

        for (index, result) in results {
            match result {
                Ok(languages) => repositories[index].languages = languages,
                Err(err) => {
                    warn!(
                        "Error fetching languages for {}: {}",
                        repositories[index].name, err
                    );
                    repositories[index].languages.clear();
                }
            }
        }

        repositories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGitHubClient;
    use crate::client::mock::sample_repo;

    #[tokio::test]
    async fn test_not_found_skips_repository_list() {
        let mock = MockGitHubClient::new().with_missing_user();
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("nobody").await;

        assert_eq!(outcome, FetchOutcome::UserNotFound);
        let counts = fetcher.api().call_counts().await;
        assert_eq!(counts.get_user, 1);
        assert_eq!(counts.list_repos, 0);
        assert_eq!(counts.list_languages, 0);
    }

    #[tokio::test]
    async fn test_rate_limited_existence_check() {
        let reset_at = Utc::now() + chrono::Duration::seconds(1800);
        let mock = MockGitHubClient::new().with_rate_limit(reset_at);
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        assert_eq!(outcome, FetchOutcome::RateLimited(reset_at));
        assert_eq!(fetcher.api().call_counts().await.list_repos, 0);
    }

    #[tokio::test]
    async fn test_unexpected_status_is_transient() {
        let mock = MockGitHubClient::new().with_user_error(ApiError::Status(500));
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        assert_eq!(
            outcome,
            FetchOutcome::TransientError("API error: 500".to_string())
        );
    }

    #[tokio::test]
    async fn test_found_attaches_languages_to_matching_repo() {
        let mock = MockGitHubClient::new()
            .with_repos(vec![sample_repo("alpha"), sample_repo("beta")])
            .with_languages("alpha", vec!["Rust", "Shell"])
            .with_languages("beta", vec!["Go"]);
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        let FetchOutcome::Found(repos) = outcome else {
            panic!("Expected Found");
        };
        assert_eq!(repos[0].name, "alpha");
        assert_eq!(repos[0].languages, vec!["Rust", "Shell"]);
        assert_eq!(repos[1].name, "beta");
        assert_eq!(repos[1].languages, vec!["Go"]);
        assert_eq!(fetcher.api().call_counts().await.list_languages, 2);
    }

    #[tokio::test]
    async fn test_language_failure_is_isolated() {
        let mock = MockGitHubClient::new()
            .with_repos(vec![
                sample_repo("alpha"),
                sample_repo("broken"),
                sample_repo("gamma"),
            ])
            .with_languages("alpha", vec!["Rust"])
            .with_language_failure("broken")
            .with_languages("gamma", vec!["Python", "C"]);
        let fetcher = RepositoryFetcher::with_concurrency(mock, 2);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        let FetchOutcome::Found(repos) = outcome else {
            panic!("Expected Found");
        };
        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].languages, vec!["Rust"]);
        assert!(repos[1].languages.is_empty());
        assert_eq!(repos[2].languages, vec!["Python", "C"]);
    }

    #[tokio::test]
    async fn test_empty_repository_list_is_found() {
        let mock = MockGitHubClient::new().with_repos(vec![]);
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        assert_eq!(outcome, FetchOutcome::Found(vec![]));
        assert_eq!(fetcher.api().call_counts().await.list_languages, 0);
    }

    #[tokio::test]
    async fn test_rate_limited_repository_list() {
        let reset_at = Utc::now() + chrono::Duration::seconds(60);
        let mock = MockGitHubClient::new().with_repos_error(ApiError::RateLimited { reset_at });
        let fetcher = RepositoryFetcher::new(mock);

        let outcome = fetcher.fetch_user_repositories("octocat").await;

        assert_eq!(outcome, FetchOutcome::RateLimited(reset_at));
    }
}

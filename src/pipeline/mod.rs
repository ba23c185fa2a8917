//! Request pipeline from raw username input to a render instruction
//!
//! The [`Orchestrator`] validates input, consults the cache, fetches on a
//! miss, and falls back to cached data when GitHub rate limits the request.
//! It never touches the terminal; `output::render` turns its result into text.

mod instruction;

pub use instruction::RenderInstruction;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::cache::CacheLayer;
use crate::client::rate_limit::advise_at;
use crate::client::{FetchOutcome, GitHubApi, RepositoryFetcher};

/// Drives one lookup per submitted username
pub struct Orchestrator<C: GitHubApi> {
    fetcher: RepositoryFetcher<C>,
    cache: Arc<CacheLayer>,
}

impl<C: GitHubApi> Orchestrator<C> {
    pub fn new(fetcher: RepositoryFetcher<C>, cache: Arc<CacheLayer>) -> Self {
        Self { fetcher, cache }
    }

    /// Handle one submission of `raw_input`
    pub async fn handle_request(&self, raw_input: &str) -> RenderInstruction {
        self.handle_request_at(raw_input, Utc::now()).await
    }

    /// [`handle_request`](Self::handle_request) with cache freshness and the
    /// rate-limit countdown evaluated at `now`
    pub async fn handle_request_at(&self, raw_input: &str, now: DateTime<Utc>) -> RenderInstruction {
        let username = raw_input.trim();
        if username.is_empty() {
            return RenderInstruction::EmptyInput;
        }

        if let Some(entry) = self.cache.lookup_at(username, now) {
            return RenderInstruction::ServeCached {
                username: username.to_string(),
                repositories: entry.repositories,
                cached_at: entry.timestamp,
            };
        }

        match self.fetcher.fetch_user_repositories(username).await {
            FetchOutcome::UserNotFound => RenderInstruction::NotFound {
                username: username.to_string(),
            },
            FetchOutcome::RateLimited(reset_at) => {
                log::debug!("Rate limited fetching {}, reset at {}", username, reset_at);
                match self.cache.lookup_at(username, now) {
                    Some(entry) => RenderInstruction::ServeStale {
                        username: username.to_string(),
                        repositories: entry.repositories,
                        cached_at: entry.timestamp,
                        advisory: advise_at(reset_at, true, now),
                    },
                    None => RenderInstruction::RateLimitBlocked {
                        username: username.to_string(),
                        advisory: advise_at(reset_at, false, now),
                    },
                }
            }
            FetchOutcome::TransientError(message) => RenderInstruction::Error {
                username: username.to_string(),
                message,
            },
            FetchOutcome::Found(repositories) => {
                let entry = self.cache.store_at(username, repositories, now);
                if entry.repositories.is_empty() {
                    RenderInstruction::NoRepos {
                        username: username.to_string(),
                    }
                } else {
                    RenderInstruction::ServeFresh {
                        username: username.to_string(),
                        repositories: entry.repositories,
                    }
                }
            }
        }
    }
}

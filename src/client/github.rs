//! GitHub REST API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::models::language_names;
use super::rate_limit::reset_from_headers;
use super::{GitHubApi, Repository, UserProfile};
use crate::config::DEFAULT_API_HOST;
use crate::error::{ApiError, Result};

/// Media type recommended by the GitHub REST docs
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Default local throttle, well under GitHub's burst tolerance
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// GitHub REST API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl GitHubClient {
    /// Create a client for api.github.com
    #[allow(dead_code)]
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_host(token, None, DEFAULT_REQUESTS_PER_SECOND)
    }

    /// Create a client for a custom API host (GitHub Enterprise, test servers)
    pub fn with_host(
        token: Option<String>,
        api_host: Option<String>,
        requests_per_second: u32,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota =
            Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let host = api_host.as_deref().unwrap_or(DEFAULT_API_HOST);
        let base_url =
            Url::parse(host).map_err(|e| ApiError::InvalidHost(format!("{}: {}", host, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidHost(host.to_string()).into());
        }

        Ok(Self {
            http,
            base_url,
            token,
            rate_limiter,
        })
    }

    /// Base URL requests are issued against
    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidHost(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET an absolute URL and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        log::debug!("GET {}", url);
        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, concat!("ghrepos/", env!("CARGO_PKG_VERSION")));
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(url.to_string()).into()),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let reset_at = reset_from_headers(response.headers(), Utc::now());
                log::debug!("Rate limited on {}, resets at {}", url, reset_at);
                Err(ApiError::RateLimited { reset_at }.into())
            }
            _ => Err(ApiError::Status(status.as_u16()).into()),
        }
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<UserProfile> {
        let url = self.endpoint(&["users", username])?;
        self.get_json(url.as_str()).await
    }

    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(&["users", username, "repos"])?;
        self.get_json(url.as_str()).await
    }

    async fn list_languages(&self, languages_url: &str) -> Result<Vec<String>> {
        let body: Map<String, Value> = self.get_json(languages_url).await?;
        Ok(language_names(&body))
    }
}

//! Rate limit interpretation for GitHub API denials
//!
//! Turns the reset information attached to a denied request into an
//! [`Advisory`] telling the caller how long to wait and whether stale data is
//! being shown in the meantime. Formatting is left to the renderer.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Unix-seconds timestamp at which the quota refills
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Seconds to wait, sent with secondary rate limits (429)
pub const RETRY_AFTER_HEADER: &str = "retry-after";

/// Longest `retry-after` honoured; larger values are capped to this
const MAX_RETRY_AFTER_SECS: i64 = 24 * 60 * 60;

/// What the caller is shown while the quota is exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Cached repositories are shown despite being possibly out of date
    ShowingStale,
    /// Nothing to show; retry after the reset
    Unavailable,
}

/// Wait advice for a rate-limited request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// When the upstream quota resets
    pub reset_at: DateTime<Utc>,
    /// Whole minutes until the reset, rounded up, never negative
    pub minutes_until_reset: i64,
    /// Whether cached data accompanies the advisory
    pub fallback: Fallback,
}

impl Advisory {
    /// Whether cached data is being shown
    #[allow(dead_code)]
    pub fn has_fallback(&self) -> bool {
        self.fallback == Fallback::ShowingStale
    }
}

/// Build an advisory relative to the current time
#[allow(dead_code)]
pub fn advise(reset_at: DateTime<Utc>, has_cache_fallback: bool) -> Advisory {
    advise_at(reset_at, has_cache_fallback, Utc::now())
}

/// Build an advisory relative to `now`
pub fn advise_at(reset_at: DateTime<Utc>, has_cache_fallback: bool, now: DateTime<Utc>) -> Advisory {
    let fallback = if has_cache_fallback {
        Fallback::ShowingStale
    } else {
        Fallback::Unavailable
    };

    Advisory {
        reset_at,
        minutes_until_reset: minutes_until(reset_at, now),
        fallback,
    }
}

/// `ceil((reset_at - now) / 60s)`, clamped to zero
pub fn minutes_until(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (reset_at - now).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + 59_999) / 60_000
}

/// Derive the reset instant from a denial's headers.
///
/// `x-ratelimit-reset` wins; `retry-after` is used relative to `now` when the
/// reset header is absent, capped at 24 hours. With neither, the reset is
/// `now`.
pub fn reset_from_headers(headers: &HeaderMap, now: DateTime<Utc>) -> DateTime<Utc> {
    let header_i64 = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
    };

    if let Some(reset) = header_i64(RATE_LIMIT_RESET_HEADER).and_then(|s| DateTime::from_timestamp(s, 0)) {
        return reset;
    }

    if let Some(secs) = header_i64(RETRY_AFTER_HEADER) {
        let wait = chrono::Duration::seconds(secs.clamp(0, MAX_RETRY_AFTER_SECS));
        return now.checked_add_signed(wait).unwrap_or(now);
    }

    log::debug!("Rate limit denial without reset headers");
    now
}

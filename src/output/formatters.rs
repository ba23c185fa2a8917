//! Reusable formatting utilities for CLI output
//!
//! Timestamps are shown in the user's local timezone. The `_in` variants take
//! an explicit timezone for deterministic tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Format a rate-limit reset as `HH:MM on YYYY-MM-DD` in local time.
pub fn format_reset(reset_at: DateTime<Utc>) -> String {
    format_reset_in(reset_at, &Local)
}

/// [`format_reset`] in an explicit timezone
pub fn format_reset_in<Tz>(reset_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    reset_at
        .with_timezone(tz)
        .format("%H:%M on %Y-%m-%d")
        .to_string()
}

/// Format a cache timestamp as a local date and time.
///
/// # Example output
/// `2025-01-15 14:30:05`
pub fn format_cached_at(cached_at: DateTime<Utc>) -> String {
    format_cached_at_in(cached_at, &Local)
}

/// [`format_cached_at`] in an explicit timezone
pub fn format_cached_at_in<Tz>(cached_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    cached_at
        .with_timezone(tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format Unix seconds as a short local date/time, or "N/A".
pub fn format_unix_seconds(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

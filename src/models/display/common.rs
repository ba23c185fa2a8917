//! Common display utilities and helpers

/// Shown in place of a missing or empty repository description
pub const NO_DESCRIPTION: &str = "No Description Exist";

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Repository description, or the placeholder when absent or blank
pub fn description_or_placeholder(description: Option<&str>) -> &str {
    match description {
        Some(d) if !d.trim().is_empty() => d,
        _ => NO_DESCRIPTION,
    }
}

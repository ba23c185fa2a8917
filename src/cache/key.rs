//! Persistent cache key generation

/// Namespace prefix shared by every persisted record
const KEY_PREFIX: &str = "gh-";

/// Key of the persisted record for `username`.
///
/// Usernames are used verbatim; the caller trims them.
pub fn cache_key(username: &str) -> String {
    format!("{}{}", KEY_PREFIX, username)
}

//! Repository models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Repository as listed by `GET /users/{username}/repos`.
///
/// The same shape is written to the persistent cache, so cached entries carry
/// the languages fetched alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,

    /// Free-form description (null on the wire when unset)
    #[serde(default)]
    pub description: Option<String>,

    /// Stargazer count
    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,

    /// Watcher count
    #[serde(rename = "watchers_count", default)]
    pub watcher_count: u64,

    /// Browser URL of the repository
    pub html_url: String,

    /// Endpoint returning the language breakdown
    pub languages_url: String,

    /// Language names, filled in by a separate request per repository
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Extract language names from a languages response body.
///
/// The body maps language name to byte count; only the keys are kept, in the
/// order the API returned them.
pub fn language_names(body: &Map<String, Value>) -> Vec<String> {
    body.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_from_api_payload() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "description": null,
            "stargazers_count": 80,
            "watchers_count": 9,
            "html_url": "https://github.com/octocat/Hello-World",
            "languages_url": "https://api.github.com/repos/octocat/Hello-World/languages",
            "fork": false
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert!(repo.description.is_none());
        assert_eq!(repo.star_count, 80);
        assert_eq!(repo.watcher_count, 9);
        assert!(repo.languages.is_empty());
    }

    #[test]
    fn test_language_names_keep_response_order() {
        let body: Map<String, Value> =
            serde_json::from_str(r#"{"Rust": 9000, "Shell": 120, "C": 40}"#).unwrap();

        assert_eq!(language_names(&body), vec!["Rust", "Shell", "C"]);
    }

    #[test]
    fn test_language_names_empty_object() {
        let body = Map::new();
        assert!(language_names(&body).is_empty());
    }
}

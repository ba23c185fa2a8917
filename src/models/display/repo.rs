//! Repository display model

use tabled::Tabled;

use super::common::{description_or_placeholder, truncate_string};
use crate::client::Repository;

/// Maximum description width in table output
const DESCRIPTION_WIDTH: usize = 50;

/// Repository display model for table output.
#[derive(Debug, Clone, Tabled)]
pub struct RepoDisplay {
    /// Repository name
    #[tabled(rename = "REPO")]
    pub name: String,

    /// Stargazer count
    #[tabled(rename = "STARS")]
    pub stars: u64,

    /// Watcher count
    #[tabled(rename = "WATCHERS")]
    pub watchers: u64,

    /// Languages in API order, comma-separated
    #[tabled(rename = "LANGUAGES")]
    pub languages: String,

    /// Description (truncated)
    #[tabled(rename = "DESCRIPTION")]
    pub description: String,

    /// Link to the repository page
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&Repository> for RepoDisplay {
    fn from(repo: &Repository) -> Self {
        let languages = if repo.languages.is_empty() {
            "--".to_string()
        } else {
            repo.languages.join(", ")
        };

        Self {
            name: repo.name.clone(),
            stars: repo.star_count,
            watchers: repo.watcher_count,
            languages,
            description: truncate_string(
                description_or_placeholder(repo.description.as_deref()),
                DESCRIPTION_WIDTH,
            ),
            url: repo.html_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::sample_repo;
    use crate::models::display::NO_DESCRIPTION;

    #[test]
    fn test_repo_display_defaults() {
        let display = RepoDisplay::from(&sample_repo("alpha"));

        assert_eq!(display.name, "alpha");
        assert_eq!(display.stars, 3);
        assert_eq!(display.watchers, 1);
        assert_eq!(display.languages, "--");
        assert_eq!(display.description, NO_DESCRIPTION);
        assert_eq!(display.url, "https://github.com/octocat/alpha");
    }

    #[test]
    fn test_repo_display_languages_in_order() {
        let mut repo = sample_repo("alpha");
        repo.languages = vec!["Rust".to_string(), "Shell".to_string()];
        repo.description = Some("Command-line tool".to_string());

        let display = RepoDisplay::from(&repo);
        assert_eq!(display.languages, "Rust, Shell");
        assert_eq!(display.description, "Command-line tool");
    }
}

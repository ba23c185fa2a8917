//! Configuration management for ghrepos

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CacheError, ConfigError, Result};

/// Public GitHub REST API host
pub const DEFAULT_API_HOST: &str = "https://api.github.com";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Optional bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API host override (defaults to api.github.com)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Directory holding the persistent cache database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Upper bound on in-flight language requests per lookup
    #[serde(default = "default_max_concurrent_languages")]
    pub max_concurrent_languages: usize,

    /// Local throttle applied to all outbound requests
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Size budget of the persistent cache, in bytes
    #[serde(default = "default_persistent_capacity_bytes")]
    pub persistent_capacity_bytes: usize,
}

fn default_max_concurrent_languages() -> usize {
    8
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_persistent_capacity_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            max_concurrent_languages: default_max_concurrent_languages(),
            requests_per_second: default_requests_per_second(),
            persistent_capacity_bytes: default_persistent_capacity_bytes(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.ghrepos/config.yaml)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".ghrepos").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.preferences.max_concurrent_languages == 0 {
            return Err(ConfigError::Invalid(
                "preferences.max_concurrent_languages must be at least 1".to_string(),
            )
            .into());
        }
        if self.preferences.requests_per_second == 0 {
            return Err(ConfigError::Invalid(
                "preferences.requests_per_second must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// API host with trailing slashes removed
    pub fn api_host(&self) -> String {
        self.api_host
            .as_deref()
            .unwrap_or(DEFAULT_API_HOST)
            .trim_end_matches('/')
            .to_string()
    }

    /// Persistent cache directory (~/.cache/ghrepos on Linux)
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("ghrepos"))
    }

    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| {
            let visible: String = t
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{}", visible)
        })
    }
}

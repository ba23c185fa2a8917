//! Command execution context
//!
//! Loads configuration once, applies CLI/env overrides, and wires the API
//! client, the cache, and the orchestrator that lookups run through.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{CacheLayer, PersistentStore, SqliteStore, VolatileStore};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{GitHubClient, RepositoryFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::Orchestrator;

/// Context for a `repos` invocation.
///
/// One context owns the process's only [`CacheLayer`], so the memory tier is
/// shared by every lookup in an interactive session.
pub struct CommandContext {
    /// Resolved output format
    pub format: OutputFormat,
    /// Lookup pipeline over the live GitHub client
    pub orchestrator: Orchestrator<GitHubClient>,
}

impl CommandContext {
    /// Build the full lookup stack from global options.
    ///
    /// # Errors
    /// Returns error if the config file cannot be parsed or is invalid, or
    /// the HTTP client cannot be built. An unusable cache directory is not
    /// an error; the session then caches in memory only.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = load_config(opts)?;
        let format = opts.resolve_format(&config);

        let client = GitHubClient::with_host(
            config.token.clone(),
            Some(config.api_host()),
            config.preferences.requests_per_second,
        )?;
        let fetcher =
            RepositoryFetcher::with_concurrency(client, config.preferences.max_concurrent_languages);

        let cache = Arc::new(CacheLayer::new(open_store(&config)));
        let orchestrator = Orchestrator::new(fetcher, cache);

        Ok(Self {
            format,
            orchestrator,
        })
    }
}

/// Load the config file and fold in CLI/env overrides
pub fn load_config(opts: &GlobalOptions) -> Result<Config> {
    let mut config = Config::load_at(opts.config_ref())?;
    opts.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Open the on-disk store, degrading to a process-local one on failure
fn open_store(config: &Config) -> Box<dyn PersistentStore> {
    let capacity = config.preferences.persistent_capacity_bytes;

    let opened = config
        .cache_dir()
        .map_err(|e| e.to_string())
        .and_then(|dir| open_sqlite(&dir, capacity).map_err(|e| e.to_string()));

    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Persistent cache unavailable ({}); caching in memory only", e);
            Box::new(VolatileStore::new(capacity))
        }
    }
}

fn open_sqlite(dir: &Path, capacity: usize) -> std::result::Result<SqliteStore, crate::error::CacheError> {
    log::debug!("Opening persistent cache in {}", dir.display());
    SqliteStore::open_at(dir, capacity)
}

/// Cache directory after overrides, for the `cache` commands
pub fn resolve_cache_dir(opts: &GlobalOptions) -> Result<(Config, PathBuf)> {
    let config = load_config(opts)?;
    let dir = config.cache_dir()?;
    Ok((config, dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn opts_for(dir: &TempDir) -> GlobalOptions {
        GlobalOptions {
            format: None,
            config: Some(dir.path().join("config.yaml").display().to_string()),
            api_host: Some("http://127.0.0.1:1".to_string()),
            cache_dir: Some(dir.path().join("cache")),
            token: None,
        }
    }

    #[test]
    fn test_context_builds_with_missing_config() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::new(&opts_for(&dir)).unwrap();

        assert_eq!(ctx.format, OutputFormat::Pretty);
        assert!(dir.path().join("cache").join("cache.db").exists());
    }

    #[test]
    fn test_context_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "preferences:\n  requests_per_second: 0\n",
        )
        .unwrap();

        assert!(CommandContext::new(&opts_for(&dir)).is_err());
    }

    #[test]
    fn test_unusable_cache_dir_falls_back() {
        let dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();

        let mut opts = opts_for(&dir);
        opts.cache_dir = Some(blocker);

        assert!(CommandContext::new(&opts).is_ok());
    }
}

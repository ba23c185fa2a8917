//! Global CLI options shared across all commands

use clap::ValueEnum;
use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the `resolve_*` methods merge in the config.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json), if given on the CLI or env
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.ghrepos/config.yaml)
    pub config: Option<String>,

    /// GitHub API base URL override
    pub api_host: Option<String>,

    /// Persistent cache directory override
    pub cache_dir: Option<PathBuf>,

    /// Bearer token override
    pub token: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
            cache_dir: cli.cache_dir.clone(),
            token: cli.token.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Output format after falling back to the config preference.
    ///
    /// An unrecognised preference is ignored with a warning.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        match config.preferences.format.as_deref() {
            Some(pref) => OutputFormat::from_str(pref, true).unwrap_or_else(|_| {
                log::warn!("Ignoring unknown format preference '{}'", pref);
                OutputFormat::default()
            }),
            None => OutputFormat::default(),
        }
    }

    /// Fold CLI/env overrides into `config`
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref host) = self.api_host {
            config.api_host = Some(host.clone());
        }
        if let Some(ref dir) = self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        if let Some(ref token) = self.token {
            config.token = Some(token.clone());
        }
    }
}

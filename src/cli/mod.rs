//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod completions;
pub mod config;
pub mod context;
pub mod repos;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// ghrepos - Browse a GitHub user's repositories from the terminal
#[derive(Parser, Debug)]
#[command(name = "ghrepos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: pretty]
    #[arg(
        long,
        global = true,
        env = "GHREPOS_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "GHREPOS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GHREPOS_DEBUG", hide_env = true)]
    pub debug: bool,

    /// GitHub API base URL (for GitHub Enterprise or testing)
    #[arg(long, global = true, env = "GHREPOS_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Directory holding the persistent cache
    #[arg(long, global = true, env = "GHREPOS_CACHE_DIR", hide_env = true)]
    pub cache_dir: Option<PathBuf>,

    /// GitHub token sent as a bearer credential
    #[arg(
        long,
        global = true,
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user's public repositories and their languages
    #[command(after_help = "\
Without a username, starts an interactive session: type a username and press
Enter to look it up; 'exit', 'quit' or Ctrl-D leaves.

Examples:
  ghrepos repos octocat
  ghrepos repos octocat --format table
  ghrepos repos")]
    Repos {
        /// GitHub username (omit for an interactive session)
        username: Option<String>,
    },

    /// Manage the persistent repository cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Inspect ghrepos configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   ghrepos completion bash > /etc/bash_completion.d/ghrepos
  zsh:    ghrepos completion zsh > \"${fpath[1]}/_ghrepos\"
  fish:   ghrepos completion fish > ~/.config/fish/completions/ghrepos.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Display version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration (token masked)
    Show,
    /// Print the config file path
    Path,
}

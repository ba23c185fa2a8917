//! Output formatting for CLI results
//!
//! [`render`] maps a [`RenderInstruction`] to the text printed for it. It has
//! no side effects; callers decide where the text goes.

use colored::Colorize;

use crate::cli::OutputFormat;
use crate::client::Repository;
use crate::client::rate_limit::Advisory;
use crate::error::Result;
use crate::models::RepoDisplay;
use crate::models::display::description_or_placeholder;
use crate::pipeline::RenderInstruction;

pub mod formatters;
pub mod json;
pub mod table;

use formatters::{format_cached_at, format_reset};

/// Render `instruction` in `format`
pub fn render(instruction: &RenderInstruction, format: OutputFormat) -> Result<String> {
    if let OutputFormat::Json = format {
        return Ok(json::format_json(instruction)?);
    }

    let list = |repos: &[Repository]| match format {
        OutputFormat::Table => {
            let rows: Vec<RepoDisplay> = repos.iter().map(RepoDisplay::from).collect();
            table::format_table(&rows)
        }
        _ => pretty_repos(repos),
    };

    let text = match instruction {
        RenderInstruction::EmptyInput => {
            format!("{} Please enter a GitHub username first", "⚠".yellow())
        }
        RenderInstruction::NotFound { username } => {
            format!("{} User \"{}\" not found", "✗".red(), username)
        }
        RenderInstruction::NoRepos { username } => {
            format!("{} {} has no public repositories", "○".dimmed(), username)
        }
        RenderInstruction::Error { message, .. } => format!("{} {}", "✗".red(), message),
        RenderInstruction::RateLimitBlocked { advisory, .. } => blocked_notice(advisory),
        RenderInstruction::ServeStale {
            repositories,
            advisory,
            ..
        } => format!("{}\n\n{}", stale_notice(advisory), list(repositories)),
        RenderInstruction::ServeCached {
            username,
            repositories,
            cached_at,
        } => {
            let body = if repositories.is_empty() {
                format!("{} {} has no public repositories", "○".dimmed(), username)
            } else {
                list(repositories)
            };
            format!(
                "{}\n\n{} Showing cached data from {}",
                body,
                "ℹ".cyan(),
                format_cached_at(*cached_at)
            )
        }
        RenderInstruction::ServeFresh { repositories, .. } => list(repositories),
    };

    Ok(text)
}

fn blocked_notice(advisory: &Advisory) -> String {
    format!(
        "{} GitHub API rate limit reached. Please come back at {}\n  {}",
        "⚠".yellow(),
        format_reset(advisory.reset_at),
        format!(
            "(about {} minutes from now)",
            advisory.minutes_until_reset
        )
        .dimmed()
    )
}

fn stale_notice(advisory: &Advisory) -> String {
    format!(
        "{} GitHub API rate limit reached (resets at {})\n  {}",
        "⚠".yellow(),
        format_reset(advisory.reset_at),
        "Showing cached results".dimmed()
    )
}

/// One card per repository, separated by blank lines
fn pretty_repos(repos: &[Repository]) -> String {
    repos
        .iter()
        .map(pretty_repo)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn pretty_repo(repo: &Repository) -> String {
    let mut lines = vec![
        format!(
            "{}  {} {}  {} {}",
            repo.name.bold().cyan(),
            "★".yellow(),
            repo.star_count,
            "watchers".dimmed(),
            repo.watcher_count
        ),
        format!("  {}", description_or_placeholder(repo.description.as_deref())),
    ];

    if !repo.languages.is_empty() {
        let tags: Vec<String> = repo
            .languages
            .iter()
            .map(|l| format!("[{}]", l).green().to_string())
            .collect();
        lines.push(format!("  {}", tags.join(" ")));
    }

    lines.push(format!("  {}", repo.html_url.dimmed()));
    lines.join("\n")
}

//! Cache management commands

use colored::Colorize;

use crate::cache::{CacheTier, SqliteStore};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::cli::context::resolve_cache_dir;
use crate::error::Result;
use crate::output::formatters::{format_size, format_unix_seconds};

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let (config, dir) = resolve_cache_dir(opts)?;
    let cache = SqliteStore::open_at(&dir, config.preferences.persistent_capacity_bytes)?;
    let stats = cache.stats(CacheTier::Persistent.window().num_seconds())?;

    match opts.resolve_format(&config) {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "stale_entries": stats.stale_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "capacity_bytes": stats.capacity_bytes,
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "path": dir.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}", "Cache Status".bold());
            println!("────────────────────────────────────────");
            println!("Location:       {}", dir.display().to_string().cyan());
            println!("Entries:        {}", stats.total_entries);
            println!("Stale:          {}", stats.stale_entries);
            println!(
                "Total size:     {} of {}",
                format_size(stats.total_size_bytes),
                format_size(stats.capacity_bytes)
            );

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_unix_seconds(oldest));
            }

            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_unix_seconds(newest));
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let (config, dir) = resolve_cache_dir(opts)?;
    let cache = SqliteStore::open_at(&dir, config.preferences.persistent_capacity_bytes)?;
    let stats = cache.clear_all()?;

    match opts.resolve_format(&config) {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!(
                    "{} Cleared {} cache entries",
                    "✓".green(),
                    stats.entries_removed
                );
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache database path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let (_, dir) = resolve_cache_dir(opts)?;
    println!("{}", SqliteStore::db_path(&dir).display());
    Ok(())
}

//! Configuration inspection commands

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::cli::OutputFormat;
use crate::cli::context::load_config;
use crate::config::Config;
use crate::error::Result;

/// Print the resolved configuration with the token masked
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let config = load_config(opts)?;
    let path = Config::resolve_path(opts.config_ref())?;
    let format = opts.resolve_format(&config);
    let cache_dir = config
        .cache_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "config_path": path.display().to_string(),
                "config_file_exists": path.exists(),
                "api_host": config.api_host(),
                "token": config.masked_token(),
                "cache_dir": cache_dir,
                "format": format!("{:?}", format).to_lowercase(),
                "max_concurrent_languages": config.preferences.max_concurrent_languages,
                "requests_per_second": config.preferences.requests_per_second,
                "persistent_capacity_bytes": config.preferences.persistent_capacity_bytes,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("{}\n", "ghrepos Configuration".bold());

            let file_note = if path.exists() {
                "".normal()
            } else {
                " (not found, using defaults)".dimmed()
            };
            println!("Config file:      {}{}", path.display().to_string().cyan(), file_note);
            println!("API host:         {}", config.api_host());
            match config.masked_token() {
                Some(masked) => println!("Token:            {}", masked),
                None => println!("Token:            {}", "not set".dimmed()),
            }
            println!("Cache directory:  {}", cache_dir);
            println!("Format:           {:?}", format);
            println!(
                "Languages:        {} concurrent requests",
                config.preferences.max_concurrent_languages
            );
            println!(
                "Throttle:         {} requests/second",
                config.preferences.requests_per_second
            );
            println!(
                "Cache capacity:   {} bytes",
                config.preferences.persistent_capacity_bytes
            );
        }
    }

    Ok(())
}

/// Print the config file path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    println!("{}", Config::resolve_path(opts.config_ref())?.display());
    Ok(())
}

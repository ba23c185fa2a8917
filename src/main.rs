//! ghrepos - Browse a GitHub user's repositories and languages from the terminal

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod pipeline;

use cli::{CacheCommands, Cli, Commands, ConfigCommands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--debug` selects debug, else warn
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Repos { username } => cli::repos::run(&opts, username.as_deref()).await,
        Commands::Cache(cmd) => match cmd {
            CacheCommands::Status => cli::cache::status(&opts),
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Path => cli::config::path(&opts),
        },
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Version => {
            println!("ghrepos version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

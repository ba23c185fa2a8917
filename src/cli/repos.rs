//! `repos` command: one lookup, or an interactive session of lookups

use std::io::{BufRead, IsTerminal};
use std::time::Duration;

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::Result;
use crate::output;
use crate::pipeline::RenderInstruction;

/// Words that end an interactive session
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

/// Run the repos command.
///
/// A single lookup that ends in a failure notice exits with status 1 after
/// printing it.
pub async fn run(opts: &GlobalOptions, username: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match username {
        Some(username) => {
            if lookup(&ctx, username).await?.is_failure() {
                std::process::exit(1);
            }
            Ok(())
        }
        None if std::io::stdin().is_terminal() => interactive(&ctx).await,
        None => piped(&ctx, std::io::stdin().lock()).await,
    }
}

/// Look up one username and print the result
async fn lookup(ctx: &CommandContext, raw_input: &str) -> Result<RenderInstruction> {
    let spinner = spinner(ctx.format);
    let instruction = ctx.orchestrator.handle_request(raw_input).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    println!("{}", output::render(&instruction, ctx.format)?);
    Ok(instruction)
}

/// Prompt for usernames until exit or end of input
async fn interactive(ctx: &CommandContext) -> Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let input = Input::<String>::with_theme(&theme)
            .with_prompt("GitHub username")
            .allow_empty(true)
            .interact_text();

        let input = match input {
            Ok(input) => input,
            // Ctrl-D / closed stdin
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if is_exit(&input) {
            return Ok(());
        }

        lookup(ctx, &input).await?;
        println!();
    }
}

/// One lookup per line of piped input, as each line arrives
async fn piped<R: BufRead>(ctx: &CommandContext, input: R) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if is_exit(&line) {
            break;
        }
        lookup(ctx, &line).await?;
    }

    Ok(())
}

fn is_exit(input: &str) -> bool {
    let trimmed = input.trim();
    EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w))
}

/// Loading spinner, only for human formats on a terminal
fn spinner(format: OutputFormat) -> Option<ProgressBar> {
    if !format.is_interactive() || !std::io::stderr().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Loading repositories...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};
    use tempfile::TempDir;

    #[test]
    fn test_is_exit() {
        assert!(is_exit("exit"));
        assert!(is_exit("  QUIT "));
        assert!(!is_exit("octocat"));
        assert!(!is_exit(""));
    }

    #[test]
    fn test_no_spinner_for_json() {
        assert!(spinner(OutputFormat::Json).is_none());
    }

    /// Yields one chunk, then fails every later read
    struct OneChunk(Option<&'static [u8]>);

    impl Read for OneChunk {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.0.take() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(chunk);
                    Ok(chunk.len())
                }
                None => Err(std::io::Error::other("stream still open")),
            }
        }
    }

    #[tokio::test]
    async fn test_piped_handles_lines_as_they_arrive() {
        let dir = TempDir::new().unwrap();
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            config: Some(dir.path().join("config.yaml").display().to_string()),
            api_host: Some("http://127.0.0.1:1".to_string()),
            cache_dir: Some(dir.path().join("cache")),
            token: None,
        };
        let ctx = CommandContext::new(&opts).unwrap();

        // Reading ahead past "exit" would hit the error
        let input = BufReader::new(OneChunk(Some(&b"exit\n"[..])));
        assert!(piped(&ctx, input).await.is_ok());
    }
}

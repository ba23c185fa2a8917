//! Static shell completions

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Binary name completions are registered under
const BIN_NAME: &str = "ghrepos";

/// Write the completion script for `shell` to `out`
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

/// Print the completion script for `shell` to stdout
pub fn run(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

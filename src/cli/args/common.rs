//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - one card per repository with colored status lines
    #[default]
    Pretty,
    /// Table format - one row per repository
    Table,
    /// JSON format - the full render instruction, for scripts
    Json,
}

impl OutputFormat {
    /// Whether this format is meant for a human at a terminal
    pub fn is_interactive(&self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}

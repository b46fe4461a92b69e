//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored status lines (default)
    #[default]
    Pretty,
    /// Table format - one row per flattened contributor
    Table,
    /// JSON format - run summary and records for scripts
    Json,
}

//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod harvest;
pub mod status;

pub use args::OutputFormat;

/// Harvest the Trove contributor hierarchy into a flat CSV table
#[derive(Parser, Debug)]
#[command(name = "trove-contributors")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute; a bare invocation runs `harvest`
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TROVE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "TROVE_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Trove API key
    #[arg(long, global = true, env = "TROVE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the Trove API host
    #[arg(long, global = true, env = "TROVE_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Directory for the raw snapshot and flat CSV
    #[arg(long, global = true, env = "TROVE_OUTPUT_DIR", hide_env = true)]
    pub output_dir: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TROVE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the contributor tree, archive it, and write the flat CSV
    Harvest,

    /// Show resolved configuration
    Status,

    /// Display version information
    Version,
}

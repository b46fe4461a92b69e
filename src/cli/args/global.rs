//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For the API key, host and output directory the precedence is:
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the config file layer is merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.trove-harvest/config.yaml)
    pub config: Option<String>,

    /// API key override
    pub api_key: Option<String>,

    /// API host override for proxies and testing
    pub api_host: Option<String>,

    /// Directory for harvest artifacts
    pub output_dir: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_key: cli.api_key.clone(),
            api_host: cli.api_host.clone(),
            output_dir: cli.output_dir.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_key_ref(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }

    pub fn output_dir_ref(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }
}

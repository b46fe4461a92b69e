//! Command execution context
//!
//! Loads the config file once and layers the CLI/environment overrides on
//! top, so commands see a single resolved [`Config`].

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::TroveClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing resolved config and options
pub struct CommandContext {
    /// Config file values merged with CLI/env overrides
    pub config: Config,
    /// Where the config file lives (whether or not it exists)
    pub config_path: PathBuf,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve configuration for a command.
    ///
    /// A missing config file is not an error; commands that need an API key
    /// check for it themselves.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_or_default(opts.config_ref())?;
        config.apply_overrides(opts.api_key_ref(), opts.api_host_ref(), opts.output_dir_ref());

        Ok(Self {
            config,
            config_path,
            format: opts.format,
        })
    }

    /// Build an API client, failing if no API key is configured
    pub fn client(&self) -> Result<TroveClient> {
        TroveClient::from_config(&self.config)
    }
}

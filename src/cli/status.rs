//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;

/// Run the status command to display resolved configuration
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let config = &ctx.config;

    println!("{}\n", "Trove Contributors Configuration Status".bold());

    if ctx.config_path.exists() {
        println!("Config file: {}", ctx.config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            ctx.config_path.display().to_string().cyan(),
            "(not found, using defaults)".dimmed()
        );
    }

    println!();

    if config.validate_auth().is_ok() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Set TROVE_API_KEY pass --api-key, or add api_key to the config file");
    }

    println!("{} API host: {}", "○".dimmed(), config.api_host().cyan());
    println!(
        "{} Output directory: {}",
        "○".dimmed(),
        config.output_dir().display()
    );
    println!(
        "{} Retry: {} attempts, {}ms initial delay, x{} backoff, {}ms cap",
        "○".dimmed(),
        config.retry.max_attempts,
        config.retry.initial_delay_ms,
        config.retry.backoff_factor,
        config.retry.max_delay_ms
    );
    println!("{} Request timeout: {}s", "○".dimmed(), config.timeout_secs);
    println!();

    Ok(())
}

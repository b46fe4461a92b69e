//! Harvest command implementation

use chrono::Local;
use colored::Colorize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::cli::context::CommandContext;
use crate::error::Result;
use crate::harvest::{self, HarvestSummary};
use crate::output::{json, table};

/// Run the harvest command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.client()?;
    let output_dir = ctx.config.output_dir();

    let summary = harvest::harvest(&client, &output_dir, Local::now().date_naive()).await?;

    println!("{}", render(&summary, ctx.format)?);
    Ok(())
}

fn render(summary: &HarvestSummary, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty => render_pretty(summary),
        OutputFormat::Table => table::format_records(&summary.records),
        OutputFormat::Json => json::format_json(summary)?,
    })
}

fn render_pretty(summary: &HarvestSummary) -> String {
    [
        format!(
            "{} Fetched {} contributors ({} top-level)",
            "✓".green(),
            summary.record_count,
            summary.root_count
        ),
        format!(
            "{} Raw response archived to {}",
            "✓".green(),
            summary.raw_path.cyan()
        ),
        format!(
            "{} Flat table written to {}",
            "✓".green(),
            summary.flat_path.cyan()
        ),
    ]
    .join("\n")
}

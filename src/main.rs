//! trove-contributors - harvest and flatten the Trove contributor hierarchy

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod flatten;
mod harvest;
mod output;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Harvest) {
        Commands::Harvest => cli::harvest::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("trove-contributors version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Log to stderr; `RUST_LOG` takes precedence over `--debug`
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

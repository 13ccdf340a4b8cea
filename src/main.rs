//! dagci CLI - compile a package dependency graph into a CI workflow
//!
//! Entry point for the dagci command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dagci::cli::output::display_error;
use dagci::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the -v/-q flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.output_config().log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}

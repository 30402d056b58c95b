//! CLI entry point for talksync.

use anyhow::Result;
use clap::Parser;
use talksync_core::{StdoutReporter, Syncer};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries the progress lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = args.to_config();
    info!(
        base_url = %config.base_url,
        output_dir = %config.downloads_root.display(),
        original_language_only = config.restrict_to_original_language,
        "talksync starting"
    );

    let syncer = Syncer::new(config, StdoutReporter)?;
    let stats = syncer.run().await?;

    info!(
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        events = stats.events,
        "Sync finished"
    );

    Ok(())
}

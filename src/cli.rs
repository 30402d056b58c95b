//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use talksync_core::SyncConfig;
use talksync_core::config::{DEFAULT_BASE_URL, DEFAULT_DOWNLOADS_ROOT, MediaPolicy};
use talksync_core::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Mirror conference talk recordings into a local directory tree.
///
/// Walks every conference published by the API, picks the preferred
/// recording of each talk and downloads it unless the file already exists.
#[derive(Parser, Debug)]
#[command(name = "talksync")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,

    /// API root the conference list is fetched from
    #[arg(short = 'b', long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory receiving one subdirectory per conference
    #[arg(short = 'o', long, default_value = DEFAULT_DOWNLOADS_ROOT)]
    pub output_dir: PathBuf,

    /// Also consider recordings in languages other than the talk's original language
    #[arg(long)]
    pub include_translations: bool,

    /// HTTP connect timeout in seconds (1-600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub connect_timeout: u64,

    /// HTTP idle read timeout in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,
}

impl Args {
    /// Builds the run configuration from parsed flags.
    pub fn to_config(&self) -> SyncConfig {
        SyncConfig {
            base_url: self.base_url.clone(),
            downloads_root: self.output_dir.clone(),
            restrict_to_original_language: !self.include_translations,
            connect_timeout_secs: self.connect_timeout,
            read_timeout_secs: self.read_timeout,
            media: MediaPolicy::default(),
        }
    }
}

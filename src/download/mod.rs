//! Downloading selected recordings to disk.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for multi-gigabyte recordings)
//! - Skip when the target path already exists
//! - Parent directories created on demand
//! - Structured error types carrying the URL or path involved
//!
//! # Example
//!
//! ```no_run
//! use talksync_core::download::{DownloadOutcome, HttpClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new(reqwest::Client::new());
//! let outcome = client
//!     .ensure_downloaded(
//!         Path::new("./downloads/Camp/Ada - Opening.webm"),
//!         "https://cdn.example.org/opening.webm",
//!         || println!("downloading"),
//!     )
//!     .await?;
//! if outcome == DownloadOutcome::Skipped {
//!     println!("already there");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod error;

pub use client::{DownloadOutcome, HttpClient};
pub use error::DownloadError;

//! talksync core library
//!
//! Mirrors recordings from a conference-talk publishing API into a local
//! directory tree: one directory per conference, one file per event, using
//! the best available rendition of each talk.
//!
//! # Architecture
//!
//! - [`api`] - HTTP+JSON client for conferences, events and recordings
//! - [`select`] - Picks one recording per event by mime type and width
//! - [`naming`] - Filesystem-safe directory and file names
//! - [`download`] - Copy-if-absent streaming download
//! - [`sync`] - The sequential crawl tying everything together
//! - [`config`] - Run configuration and media policy tables
//! - [`progress`] - Human-readable progress lines

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod download;
pub mod http_client;
pub mod naming;
pub mod progress;
pub mod select;
pub mod sync;
mod user_agent;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, Conference, Event, Recording};
pub use config::{MediaPolicy, SyncConfig};
pub use download::{DownloadError, DownloadOutcome, HttpClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, StdoutReporter};
pub use select::{SelectError, select_rendition};
pub use sync::{SyncError, SyncStats, Syncer};

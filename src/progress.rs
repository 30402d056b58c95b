//! Human-readable progress lines.
//!
//! The crawl reports what it finds through a [`ProgressReporter`]. The binary
//! prints to stdout; tests use [`NoopReporter`] or collect events themselves.

use std::path::Path;

use crate::api::Recording;

/// Something worth telling the user about.
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    ConferenceFound {
        title: &'a str,
        url: &'a str,
    },
    EventFound {
        title: &'a str,
        /// Already stripped of markup and shortened.
        description: &'a str,
    },
    CandidateFound(&'a Recording),
    DownloadStarted {
        url: &'a str,
    },
    DownloadSkipped {
        path: &'a Path,
    },
    EventFinished,
    Done,
}

/// Receives progress events from the crawl.
pub trait ProgressReporter {
    fn report(&self, event: ProgressEvent<'_>);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent<'_>) {}
}

/// Prints one line per event to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl ProgressReporter for StdoutReporter {
    fn report(&self, event: ProgressEvent<'_>) {
        println!("{}", format_event(event));
    }
}

/// Renders an event as the line [`StdoutReporter`] prints.
#[must_use]
pub fn format_event(event: ProgressEvent<'_>) -> String {
    match event {
        ProgressEvent::ConferenceFound { title, url } => {
            format!("Found conference: {title}, URL: {url}")
        }
        ProgressEvent::EventFound { title, description } => {
            if description.is_empty() {
                format!("\tFound event: {title}")
            } else {
                format!("\tFound event: {title} - {description}")
            }
        }
        ProgressEvent::CandidateFound(rec) => format_candidate(rec),
        ProgressEvent::DownloadStarted { url } => format!("\t\tDownloading: {url}"),
        ProgressEvent::DownloadSkipped { path } => {
            format!("\t\tFile {} already exists - skipping!", path.display())
        }
        ProgressEvent::EventFinished => String::new(),
        ProgressEvent::Done => "Done.".to_string(),
    }
}

fn format_candidate(rec: &Recording) -> String {
    let minutes = rec.length / 60;
    if rec.is_audio_only() {
        format!(
            "\t\tFound audio ({}): {} minutes (HD: {}, {}MiB) {}",
            rec.mime_type, minutes, rec.high_quality, rec.size, rec.url
        )
    } else {
        format!(
            "\t\tFound video ({}): {} minutes, {}x{} (HD: {}, {}MiB) {}",
            rec.mime_type, minutes, rec.width, rec.height, rec.high_quality, rec.size, rec.url
        )
    }
}

//! The crawl: conferences → events → recordings → download.
//!
//! Strictly sequential. Each conference, event and download finishes before
//! the next begins, and the first error of any kind ends the run.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, ApiError, Conference, Event};
use crate::config::SyncConfig;
use crate::download::{DownloadError, DownloadOutcome, HttpClient};
use crate::http_client::{HttpClientError, HttpTimeouts, build_http_client};
use crate::naming;
use crate::progress::{ProgressEvent, ProgressReporter};
use crate::select::{SelectError, select_rendition};

/// Longest description shown in an "event found" line, in chars.
const DESCRIPTION_MAX_CHARS: usize = 48;

#[allow(clippy::expect_used)]
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("markup regex is valid"));

/// Any failure that ends the run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    HttpClient(#[from] HttpClientError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot pick a recording for event \"{event}\": {source}")]
    Select {
        event: String,
        #[source]
        source: SelectError,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub conferences: usize,
    pub events: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub bytes_downloaded: u64,
}

/// Drives one crawl with a fixed configuration.
#[derive(Debug)]
pub struct Syncer<R> {
    api: ApiClient,
    downloader: HttpClient,
    config: SyncConfig,
    reporter: R,
}

impl<R: ProgressReporter> Syncer<R> {
    /// Builds the shared HTTP client from `config` and wires up the crawl.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(config: SyncConfig, reporter: R) -> Result<Self, SyncError> {
        let client = build_http_client(HttpTimeouts {
            connect_secs: config.connect_timeout_secs,
            read_secs: config.read_timeout_secs,
        })?;
        Ok(Self::with_client(client, config, reporter))
    }

    /// Wires up the crawl around an existing client.
    pub fn with_client(client: reqwest::Client, config: SyncConfig, reporter: R) -> Self {
        Self {
            api: ApiClient::new(client.clone(), config.base_url.clone()),
            downloader: HttpClient::new(client),
            config,
            reporter,
        }
    }

    /// Mirrors every conference.
    ///
    /// # Errors
    ///
    /// Returns the first [`SyncError`] raised by any step; nothing after it runs.
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    pub async fn run(&self) -> Result<SyncStats, SyncError> {
        let mut stats = SyncStats::default();

        let conferences = self.api.fetch_conferences().await?;
        info!(count = conferences.len(), "found conferences");

        for conference in &conferences {
            self.sync_conference(conference, &mut stats).await?;
        }

        self.reporter.report(ProgressEvent::Done);
        info!(
            conferences = stats.conferences,
            events = stats.events,
            downloaded = stats.downloaded,
            skipped = stats.skipped,
            bytes = stats.bytes_downloaded,
            "sync complete"
        );
        Ok(stats)
    }

    #[instrument(skip_all, fields(conference = %conference.acronym))]
    async fn sync_conference(
        &self,
        conference: &Conference,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        self.reporter.report(ProgressEvent::ConferenceFound {
            title: &conference.title,
            url: &conference.url,
        });
        stats.conferences += 1;

        let events = self.api.fetch_events(&conference.url).await?;
        debug!(count = events.len(), "found events");

        for event in &events {
            self.sync_event(conference, event, stats).await?;
        }
        Ok(())
    }

    #[instrument(skip_all, fields(event = %event.title, guid = %event.guid))]
    async fn sync_event(
        &self,
        conference: &Conference,
        event: &Event,
        stats: &mut SyncStats,
    ) -> Result<(), SyncError> {
        let description = summarize_description(event.description.as_deref().unwrap_or(""));
        self.reporter.report(ProgressEvent::EventFound {
            title: &event.title,
            description: &description,
        });
        stats.events += 1;
        debug!(
            date = event.date.as_deref().unwrap_or("unknown"),
            language = %event.original_language,
            "processing event"
        );

        let recordings = self.api.fetch_media(&event.url).await?;
        let restrict = self.config.restrict_to_original_language;
        for recording in recordings
            .iter()
            .filter(|r| !restrict || r.language == event.original_language)
        {
            self.reporter.report(ProgressEvent::CandidateFound(recording));
        }

        let chosen = select_rendition(
            &recordings,
            &event.original_language,
            restrict,
            &self.config.media,
        )
        .map_err(|source| SyncError::Select {
            event: event.title.clone(),
            source,
        })?;
        debug!(mime_type = %chosen.mime_type, width = chosen.width, "selected recording");

        let target = naming::event_path(
            &self.config.downloads_root,
            &conference.title,
            event,
            &chosen.mime_type,
            &self.config.media,
        );

        let outcome = self
            .downloader
            .ensure_downloaded(&target, &chosen.recording_url, || {
                self.reporter.report(ProgressEvent::DownloadStarted {
                    url: &chosen.recording_url,
                });
            })
            .await?;
        match outcome {
            DownloadOutcome::Skipped => {
                self.reporter
                    .report(ProgressEvent::DownloadSkipped { path: &target });
                stats.skipped += 1;
            }
            DownloadOutcome::Downloaded { bytes } => {
                stats.downloaded += 1;
                stats.bytes_downloaded += bytes;
            }
        }

        self.reporter.report(ProgressEvent::EventFinished);
        Ok(())
    }
}

/// One-line preview of an event description: markup removed, line breaks
/// dropped, cut to 48 chars with a trailing `...`.
#[must_use]
pub fn summarize_description(raw: &str) -> String {
    let text = MARKUP_TAG.replace_all(raw, "");
    let text = decode_entities(&text).replace(['\n', '\r'], "");
    let text = text.trim();

    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        let mut short: String = text.chars().take(DESCRIPTION_MAX_CHARS - 3).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

//! Copy-if-absent download of one recording.
//!
//! A file already present at the target path counts as done, whatever its
//! size or content. Otherwise the body is streamed to a freshly created file.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::WRITE_BUFFER_BYTES;
use super::error::DownloadError;

/// What [`HttpClient::ensure_downloaded`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Something already existed at the target path; nothing was fetched.
    Skipped,
    /// The recording was fetched and written.
    Downloaded {
        /// Bytes written to disk.
        bytes: u64,
    },
}

/// Streams recordings to disk.
///
/// Wraps a shared `reqwest::Client`; cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns `true` when something already exists at `target`.
    async fn is_present(&self, target: &Path) -> Result<bool, DownloadError> {
        tokio::fs::try_exists(target)
            .await
            .map_err(|e| DownloadError::io(target, e))
    }

    /// Downloads `url` to `target` unless `target` already exists.
    ///
    /// `on_start` runs once, right before a fetch begins; it is not called
    /// when the target is skipped. Missing parent directories are created. The target is opened with
    /// exclusive creation before the request is sent. If the transfer fails
    /// midway the partial file stays on disk and will be treated as complete
    /// by the next run.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if the URL is invalid, directory or file
    /// creation fails, the request fails or returns a non-success status, or
    /// writing to disk fails.
    #[instrument(skip(self, on_start), fields(target = %target.display()))]
    pub async fn ensure_downloaded(
        &self,
        target: &Path,
        url: &str,
        on_start: impl FnOnce(),
    ) -> Result<DownloadOutcome, DownloadError> {
        if self.is_present(target).await? {
            info!("file already exists, skipping");
            return Ok(DownloadOutcome::Skipped);
        }
        on_start();
        let bytes = self.download_new(target, url).await?;
        Ok(DownloadOutcome::Downloaded { bytes })
    }

    /// Downloads `url` into a new file at `target`, returning bytes written.
    /// Exclusive creation fails if `target` already exists.
    async fn download_new(&self, target: &Path, url: &str) -> Result<u64, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(target)
            .await
            .map_err(|e| DownloadError::io(target, e))?;
        debug!(path = %target.display(), "created output file");

        let response = match self.send_get(url).await {
            Ok(response) => response,
            Err(error) => {
                warn!(path = %target.display(), "request failed; empty file left on disk");
                return Err(error);
            }
        };

        let bytes = stream_to_file(&mut file, response, url, target)
            .await
            .inspect_err(|_| {
                warn!(path = %target.display(), "transfer failed; partial file left on disk");
            })?;

        info!(path = %target.display(), bytes, "download complete");
        Ok(bytes)
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        if !response.status().is_success() {
            return Err(DownloadError::http_status(url, response.status().as_u16()));
        }
        Ok(response)
    }
}

/// Streams the response body to `file` verbatim, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

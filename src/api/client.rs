//! HTTP+JSON client for the three API endpoints.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::error::ApiError;
use super::models::{Conference, ConferenceDetail, ConferenceList, Event, EventDetail, Recording};

/// Fetches conference, event and recording documents.
///
/// Each call performs exactly one GET. There is no retry; callers treat any
/// error as fatal.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `https://api.media.ccc.de/public`).
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists every conference.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request fails, the server answers with a
    /// non-success status, or the body does not decode.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_conferences(&self) -> Result<Vec<Conference>, ApiError> {
        let url = format!("{}/conferences", self.base_url);
        let list: ConferenceList = self.get_json(&url).await?;
        debug!(count = list.conferences.len(), "fetched conferences");
        Ok(list.conferences)
    }

    /// Lists the events of the conference served at `conference_url`.
    ///
    /// # Errors
    ///
    /// See [`fetch_conferences`](Self::fetch_conferences).
    #[instrument(skip(self))]
    pub async fn fetch_events(&self, conference_url: &str) -> Result<Vec<Event>, ApiError> {
        let detail: ConferenceDetail = self.get_json(conference_url).await?;
        debug!(count = detail.events.len(), "fetched events");
        Ok(detail.events)
    }

    /// Lists the recordings of the event served at `event_url`.
    ///
    /// # Errors
    ///
    /// See [`fetch_conferences`](Self::fetch_conferences).
    #[instrument(skip(self))]
    pub async fn fetch_media(&self, event_url: &str) -> Result<Vec<Recording>, ApiError> {
        let detail: EventDetail = self.get_json(event_url).await?;
        debug!(count = detail.recordings.len(), "fetched recordings");
        Ok(detail.recordings)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        Url::parse(url).map_err(|_| ApiError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), url, "API returned error status");
            return Err(ApiError::http_status(url, status.as_u16()));
        }

        // Read the whole body first so transport failures and decode failures
        // stay distinguishable.
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(url, e))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::decode(url, e))
    }
}

//! Response documents returned by the publishing API.
//!
//! The API sends `null` for many fields that are usually strings or numbers,
//! so most fields decode `null` and absence alike into the type's default.

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET {base}/conferences`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceList {
    pub conferences: Vec<Conference>,
}

/// One entry of the conference list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Conference {
    #[serde(deserialize_with = "null_as_default")]
    pub acronym: String,
    #[serde(deserialize_with = "null_as_default")]
    pub aspect_ratio: String,
    #[serde(deserialize_with = "null_as_default")]
    pub images_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logo_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recordings_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub schedule_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    /// Where this conference's event list is served.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub webgen_location: String,
}

/// Body of `GET {conference.url}`; only the event list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<Event>,
}

/// A talk within a conference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub guid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub subtitle: Option<String>,
    /// Speakers, first one is used in the filename.
    #[serde(deserialize_with = "null_as_default")]
    pub persons: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub original_language: String,
    pub description: Option<String>,
    pub date: Option<String>,
    /// Where this event's recording list is served.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Event {
    /// First listed speaker, if any.
    #[must_use]
    pub fn first_person(&self) -> Option<&str> {
        self.persons.first().map(String::as_str)
    }
}

/// Body of `GET {event.url}`; only the recording list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub recordings: Vec<Recording>,
}

/// One encoded rendition of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Recording {
    #[serde(deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    /// Zero for audio-only renditions.
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub high_quality: bool,
    /// Size in MiB.
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    /// Duration in seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub length: u64,
    /// The media file itself.
    #[serde(deserialize_with = "null_as_default")]
    pub recording_url: String,
    /// API document describing this recording.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Recording {
    #[must_use]
    pub fn is_audio_only(&self) -> bool {
        self.width == 0
    }
}

//! Run configuration and media policy tables.
//!
//! Everything here is built once at startup and handed to the components that
//! need it. Nothing is mutated after construction.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Default API root. Endpoint paths are appended to this.
pub const DEFAULT_BASE_URL: &str = "https://api.media.ccc.de/public";

/// Default directory that receives one subdirectory per conference.
pub const DEFAULT_DOWNLOADS_ROOT: &str = "./downloads/";

/// Mime types in order of preference (index 0 is the most preferred).
pub const PREFERRED_MIME_TYPES: &[&str] = &[
    "video/webm",
    "video/mp4",
    "video/ogg",
    "audio/ogg",
    "audio/opus",
    "audio/mpeg",
    "application/x-subrip",
];

/// File extensions for the mime types we know how to name.
///
/// `application/x-subrip` is ranked in [`PREFERRED_MIME_TYPES`] but has no
/// extension here; see [`MediaPolicy::extension_for`].
pub const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("video/webm", "webm"),
    ("video/mp4", "mp4"),
    ("video/ogg", "ogm"),
    ("audio/ogg", "ogg"),
    ("audio/opus", "opus"),
    ("audio/mpeg", "mp3"),
];

/// Mime priority and extension tables used by the selector and the namer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPolicy {
    preferred_mime_types: Vec<String>,
    extensions: HashMap<String, String>,
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self::new(
            PREFERRED_MIME_TYPES.iter().copied(),
            MIME_EXTENSIONS.iter().copied(),
        )
    }
}

impl MediaPolicy {
    /// Builds a policy from a ranked mime list and a mime→extension table.
    ///
    /// Mime types are stored lower-cased.
    pub fn new<'a, P, E>(preferred: P, extensions: E) -> Self
    where
        P: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            preferred_mime_types: preferred.into_iter().map(str::to_lowercase).collect(),
            extensions: extensions
                .into_iter()
                .map(|(mime, ext)| (mime.to_lowercase(), ext.to_string()))
                .collect(),
        }
    }

    /// Zero-based rank of `mime_type` in the priority table, or `None` when
    /// the table does not list it. Comparison is case-insensitive.
    #[must_use]
    pub fn priority_of(&self, mime_type: &str) -> Option<usize> {
        let mime = mime_type.to_lowercase();
        self.preferred_mime_types.iter().position(|m| *m == mime)
    }

    /// File extension (without the dot) for `mime_type`.
    ///
    /// Returns `None` for mime types that are ranked but have no mapping.
    #[must_use]
    pub fn extension_for(&self, mime_type: &str) -> Option<&str> {
        self.extensions
            .get(&mime_type.to_lowercase())
            .map(String::as_str)
    }
}

/// Settings for one crawl.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// API root, e.g. `https://api.media.ccc.de/public`.
    pub base_url: String,
    /// Directory receiving per-conference subdirectories.
    pub downloads_root: PathBuf,
    /// Drop recordings whose language differs from the event's original language.
    pub restrict_to_original_language: bool,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP per-read idle timeout in seconds.
    pub read_timeout_secs: u64,
    pub media: MediaPolicy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            downloads_root: PathBuf::from(DEFAULT_DOWNLOADS_ROOT),
            restrict_to_original_language: true,
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            media: MediaPolicy::default(),
        }
    }
}

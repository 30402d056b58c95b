//! Rendition selection.
//!
//! Picks the single recording to download for an event: optionally keep only
//! recordings in the event's original language, then take the one whose mime
//! type ranks best in the [`MediaPolicy`] priority table. Ties on rank go to
//! the wider picture.

use thiserror::Error;
use tracing::trace;

use crate::api::Recording;
use crate::config::MediaPolicy;

/// Why no rendition could be chosen.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// Nothing left after language filtering (or the event had no recordings).
    #[error("no recordings available for this event (original language: {original_language:?})")]
    NoCandidates { original_language: String },

    /// A recording uses a mime type absent from the priority table.
    #[error("unknown mime type encountered: {mime_type}")]
    UnknownMimeType { mime_type: String },
}

/// Selects the preferred recording among `candidates`.
///
/// Every surviving candidate must have a ranked mime type, even when a better
/// one is present. Among equal ranks the strictly larger `width` wins, so an
/// audio-only rendition (width 0) never displaces a video of the same rank.
/// Full ties keep the earliest candidate.
///
/// # Errors
///
/// - [`SelectError::NoCandidates`] when filtering leaves nothing
/// - [`SelectError::UnknownMimeType`] for the first unranked mime type
pub fn select_rendition<'a>(
    candidates: &'a [Recording],
    original_language: &str,
    restrict_to_original_language: bool,
    policy: &MediaPolicy,
) -> Result<&'a Recording, SelectError> {
    let mut best: Option<(usize, &Recording)> = None;

    for candidate in candidates {
        if restrict_to_original_language && candidate.language != original_language {
            trace!(
                language = %candidate.language,
                mime_type = %candidate.mime_type,
                "skipping translated recording"
            );
            continue;
        }

        let priority =
            policy
                .priority_of(&candidate.mime_type)
                .ok_or_else(|| SelectError::UnknownMimeType {
                    mime_type: candidate.mime_type.clone(),
                })?;

        let better = match best {
            None => true,
            Some((best_priority, best_candidate)) => {
                priority < best_priority
                    || (priority == best_priority && candidate.width > best_candidate.width)
            }
        };
        if better {
            best = Some((priority, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
        .ok_or_else(|| SelectError::NoCandidates {
            original_language: original_language.to_string(),
        })
}

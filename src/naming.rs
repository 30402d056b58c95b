//! Directory and file names derived from API text.
//!
//! Titles, speaker names and subtitles come straight from the API and may
//! contain anything. Every fragment goes through [`sanitize_component`], which
//! yields text that is safe as a single path segment on common filesystems.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::api::Event;
use crate::config::MediaPolicy;

/// Stand-in for a title that sanitizes to nothing.
pub const UNTITLED: &str = "untitled";

/// Longest filename (in bytes) accepted by common filesystems.
pub const MAX_FILENAME_BYTES: usize = 255;

/// Makes `value` safe as one path segment while keeping it readable.
///
/// - `/ \ : * ? " < > |` become `-`
/// - control characters are dropped
/// - runs of whitespace collapse into one space
/// - surrounding whitespace and dots are trimmed, so `.` and `..` vanish
///
/// The result may be empty; callers decide on a fallback.
#[must_use]
pub fn sanitize_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_space = false;
    for ch in value.chars() {
        let mapped = match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_whitespace() => {
                pending_space = true;
                continue;
            }
            c if c.is_control() => continue,
            c => c,
        };
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(mapped);
    }
    out.trim_matches(|c: char| c == '.' || c.is_whitespace())
        .to_string()
}

fn sanitize_or_untitled(value: &str) -> String {
    let cleaned = sanitize_component(value);
    if cleaned.is_empty() {
        UNTITLED.to_string()
    } else {
        cleaned
    }
}

/// Directory receiving every recording of the conference titled `title`.
#[must_use]
pub fn conference_dir(downloads_root: &Path, title: &str) -> PathBuf {
    let cleaned = truncate_to_bytes(&sanitize_component(title), MAX_FILENAME_BYTES);
    if cleaned.is_empty() {
        downloads_root.join(UNTITLED)
    } else {
        downloads_root.join(cleaned)
    }
}

/// Filename for `event` downloaded as `mime_type`.
///
/// Shape: `{first speaker} - {title} ({subtitle}).{ext}`, where the speaker
/// prefix and subtitle suffix only appear when they have content.
///
/// A mime type that is ranked but has no extension mapping (currently
/// `application/x-subrip`) yields a name ending in a bare `.`; a warning is
/// logged because the correct extension is undecided.
#[must_use]
pub fn event_filename(event: &Event, mime_type: &str, policy: &MediaPolicy) -> String {
    let author = event
        .first_person()
        .map(sanitize_component)
        .filter(|name| !name.is_empty())
        .map(|name| format!("{name} - "))
        .unwrap_or_default();
    let title = sanitize_or_untitled(&event.title);
    let subtitle = event
        .subtitle
        .as_deref()
        .map(sanitize_component)
        .filter(|s| !s.is_empty())
        .map(|s| format!(" ({s})"))
        .unwrap_or_default();

    let extension = policy.extension_for(mime_type).unwrap_or_else(|| {
        warn!(
            mime_type,
            title = %event.title,
            "no file extension configured for mime type; filename will end in '.'"
        );
        ""
    });

    let suffix = format!(".{extension}");
    let stem = fit_stem(
        &author,
        &title,
        &subtitle,
        MAX_FILENAME_BYTES.saturating_sub(suffix.len()),
    );
    format!("{stem}{suffix}")
}

/// Joins the name parts within `budget` bytes, shortening only the title.
///
/// The subtitle is dropped whole when it and the speaker prefix would take
/// more than half the budget, so a cut never lands inside `( )`.
fn fit_stem(author: &str, title: &str, subtitle: &str, budget: usize) -> String {
    let full = format!("{author}{title}{subtitle}");
    if full.len() <= budget {
        return full;
    }
    let subtitle = if author.len() + subtitle.len() > budget / 2 {
        ""
    } else {
        subtitle
    };
    let title = truncate_to_bytes(title, budget.saturating_sub(author.len() + subtitle.len()));
    truncate_to_bytes(&format!("{author}{title}{subtitle}"), budget)
}

/// Full target path for `event` of the conference titled `conference_title`.
#[must_use]
pub fn event_path(
    downloads_root: &Path,
    conference_title: &str,
    event: &Event,
    mime_type: &str,
    policy: &MediaPolicy,
) -> PathBuf {
    conference_dir(downloads_root, conference_title).join(event_filename(event, mime_type, policy))
}

/// Cuts `value` to at most `max_bytes` bytes on a char boundary, trimming any
/// whitespace left dangling at the cut.
fn truncate_to_bytes(value: &str, max_bytes: usize) -> String {
    if value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].trim_end().to_string()
}

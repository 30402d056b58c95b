//! Client for the conference publishing API.
//!
//! Three read-only endpoints are used:
//!
//! - `GET {base}/conferences` lists every conference
//! - `GET {conference.url}` returns a conference with its `events`
//! - `GET {event.url}` returns an event with its `recordings`

mod client;
mod error;
mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{Conference, ConferenceDetail, ConferenceList, Event, EventDetail, Recording};

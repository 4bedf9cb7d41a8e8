//! Lookup of single events by their URI.

use std::borrow::Cow;

use esmock_types::{Event, EventAtomResponse, Timestamp};

use crate::error::{Result, SimulatorError};

/// Find the event whose identity link matches `uri`.
///
/// Both sides are compared percent-decoded, ignoring a trailing slash.
pub fn resolve_event<'a>(events: &'a [Event], uri: &str) -> Result<&'a Event> {
    let wanted = normalize(uri);
    events
        .iter()
        .find(|e| e.self_uri().is_some_and(|own| normalize(own) == wanted))
        .ok_or_else(|| SimulatorError::EventNotFound(uri.to_string()))
}

fn normalize(uri: &str) -> Cow<'_, str> {
    let uri = uri.trim_end_matches('/');
    urlencoding::decode(uri).unwrap_or(Cow::Borrowed(uri))
}

/// Build the document served for a direct fetch of `event`.
pub fn event_response(event: &Event, updated: &Timestamp) -> Result<EventAtomResponse> {
    Ok(EventAtomResponse {
        title: event.title(),
        id: event.self_uri().unwrap_or_default().to_string(),
        updated: updated.clone(),
        summary: event.event_type.clone(),
        content: serde_json::to_value(event)?,
    })
}

//! Synthetic streams for exercising feed readers.

use esmock_types::{
    Author, EDIT_RELATION, Event, EventAtomResponse, EventLink, Feed, STREAM_RELATION, Timestamp,
};
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

use crate::{error::Result, feed, parser::parse_url, resolver::event_response};

/// Event type used when a generator is given none
pub const DEFAULT_EVENT_TYPE: &str = "TestEvent";

/// Create `count` contiguous events for `stream`, numbered from 0.
///
/// Each event links to `{host}/streams/{stream}/{n}/` as its own URI. Event types
/// are taken from `event_types` in rotation.
pub fn create_test_events(
    count: u64,
    stream: &str,
    host: &str,
    event_types: &[&str],
) -> Vec<Event> {
    (0..count)
        .map(|n| {
            let event_type = if event_types.is_empty() {
                DEFAULT_EVENT_TYPE
            } else {
                event_types[(n % event_types.len() as u64) as usize]
            };
            create_test_event(
                stream,
                host,
                n,
                event_type,
                json!({ "foo": format!("Some text {}", n), "number": n }),
                json!({ "bar": Uuid::new_v4().to_string() }),
            )
        })
        .collect()
}

/// Create a single event at `event_number` of `stream` with the given payloads.
pub fn create_test_event(
    stream: &str,
    host: &str,
    event_number: u64,
    event_type: &str,
    data: JsonValue,
    metadata: JsonValue,
) -> Event {
    let stream_uri = format!("{}/streams/{}", host, stream);
    Event {
        stream: stream.to_string(),
        event_number,
        event_type: event_type.to_string(),
        event_id: Uuid::new_v4(),
        data,
        metadata,
        links: vec![
            EventLink::new(format!("{}/{}/", stream_uri, event_number), EDIT_RELATION),
            EventLink::new(stream_uri, STREAM_RELATION),
        ],
    }
}

/// Assemble the feed page a simulator would serve for `url`.
pub fn create_test_feed(events: &[Event], url: &str) -> Result<Feed> {
    feed::assemble(events, url)
}

/// Assemble a feed page with a fixed `updated` stamp.
pub fn create_test_feed_at(events: &[Event], url: &str, updated: &Timestamp) -> Result<Feed> {
    let request = parse_url(url)?;
    feed::assemble_request(events, &request, updated, &Author::default())
}

/// The single-event document a simulator would serve for `event`.
pub fn create_test_event_atom_response(
    event: &Event,
    updated: &Timestamp,
) -> Result<EventAtomResponse> {
    event_response(event, updated)
}

//! The simulator: a fixed set of streams answering feed, event and metadata requests.

use std::collections::{BTreeMap, HashMap};

use esmock_types::{Author, Event, EventAtomResponse, Feed, FeedRequest, Timestamp};
use serde_json::{Value as JsonValue, json};
use tracing::{debug, info};

use crate::{
    error::{Result, SimulatorError},
    feed::assemble_request,
    parser::{Resource, parse_resource},
    resolver::{event_response, resolve_event},
};

/// Options for building a simulator.
#[derive(Debug, Clone, Default)]
pub struct SimulatorOptions {
    /// Author reported on feeds and entries
    pub author: Author,
    /// Metadata document served for each stream, keyed by stream name
    pub stream_metadata: HashMap<String, JsonValue>,
}

impl SimulatorOptions {
    pub fn with_stream_metadata(mut self, stream: impl Into<String>, metadata: JsonValue) -> Self {
        self.stream_metadata.insert(stream.into(), metadata);
        self
    }
}

/// What a request resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulatorResponse {
    Feed(Feed),
    Event(EventAtomResponse),
    Metadata(JsonValue),
}

/// Serves paginated Atom feeds over a fixed set of events.
///
/// The events are grouped by stream at construction and never change afterwards,
/// so a simulator can be shared freely between concurrent requests.
#[derive(Debug, Clone)]
pub struct AtomFeedSimulator {
    streams: BTreeMap<String, Vec<Event>>,
    options: SimulatorOptions,
}

impl AtomFeedSimulator {
    /// Build a simulator over `events`.
    ///
    /// Fails when `events` is empty, or when a stream's event numbers do not run
    /// contiguously from 0.
    pub fn new(events: Vec<Event>, options: SimulatorOptions) -> Result<Self> {
        if events.is_empty() {
            return Err(SimulatorError::NoEventsProvided);
        }

        let mut streams: BTreeMap<String, Vec<Event>> = BTreeMap::new();
        for event in events {
            streams.entry(event.stream.clone()).or_default().push(event);
        }

        for (stream, events) in streams.iter_mut() {
            events.sort_by_key(|e| e.event_number);
            for (expected, event) in events.iter().enumerate() {
                if event.event_number != expected as u64 {
                    return Err(SimulatorError::NonContiguousEvents {
                        stream: stream.clone(),
                        expected: expected as u64,
                        found: event.event_number,
                    });
                }
            }
            info!(stream = %stream, events = events.len(), "Registered stream");
        }

        Ok(Self { streams, options })
    }

    /// Names of the simulated streams
    pub fn streams(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(String::as_str)
    }

    /// Events of `stream`, oldest first
    pub fn events(&self, stream: &str) -> Result<&[Event]> {
        self.streams
            .get(stream)
            .map(Vec::as_slice)
            .ok_or_else(|| SimulatorError::StreamNotFound(stream.to_string()))
    }

    /// Answer a request for `url`.
    ///
    /// A URL naming an event returns that event; `/streams/{s}/metadata` returns
    /// the stream's metadata; anything else is read as a feed page.
    pub fn handle(&self, url: &str) -> Result<SimulatorResponse> {
        if let Some(event) = self.find_event(url) {
            debug!(url = %url, event_number = event.event_number, "Serving event");
            return event_response(event, &Timestamp::now()).map(SimulatorResponse::Event);
        }

        match parse_resource(url)? {
            Resource::Metadata { stream, .. } => {
                debug!(stream = %stream, "Serving stream metadata");
                self.metadata(&stream).map(SimulatorResponse::Metadata)
            }
            Resource::Feed(request) => self.feed_for(&request).map(SimulatorResponse::Feed),
        }
    }

    /// Feed page addressed by `url`
    pub fn feed(&self, url: &str) -> Result<Feed> {
        match parse_resource(url)? {
            Resource::Feed(request) => self.feed_for(&request),
            Resource::Metadata { .. } => Err(SimulatorError::ParseError(format!(
                "{} addresses stream metadata, not a feed page",
                url
            ))),
        }
    }

    /// Feed page described by an already parsed request
    pub fn feed_for(&self, request: &FeedRequest) -> Result<Feed> {
        let events = self.events(&request.stream)?;
        debug!(
            stream = %request.stream,
            version = %request.version,
            direction = %request.direction,
            page_size = request.page_size,
            "Serving feed page"
        );
        assemble_request(events, request, &Timestamp::now(), &self.options.author)
    }

    /// Single-event document for the event identified by `uri`
    pub fn event(&self, uri: &str) -> Result<EventAtomResponse> {
        let event = self
            .find_event(uri)
            .ok_or_else(|| SimulatorError::EventNotFound(uri.to_string()))?;
        event_response(event, &Timestamp::now())
    }

    /// Metadata document of `stream`; an empty object when none was configured
    pub fn metadata(&self, stream: &str) -> Result<JsonValue> {
        self.events(stream)?;
        Ok(self
            .options
            .stream_metadata
            .get(stream)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }

    fn find_event(&self, uri: &str) -> Option<&Event> {
        self.streams
            .values()
            .find_map(|events| resolve_event(events, uri).ok())
    }
}

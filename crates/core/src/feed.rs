//! Assembly of feed pages from a stream's events.

use esmock_types::{
    Author, Event, Feed, FeedEntry, FeedLink, FeedRequest, LinkRelation, Timestamp,
};

use crate::{error::Result, links::build_links, parser::parse_url, window::Window};

/// Assemble the page addressed by `request_url` over `events`, stamped with the current time.
pub fn assemble(events: &[Event], request_url: &str) -> Result<Feed> {
    let request = parse_url(request_url)?;
    assemble_request(events, &request, &Timestamp::now(), &Author::default())
}

/// Assemble the page described by an already parsed request.
pub fn assemble_request(
    events: &[Event],
    request: &FeedRequest,
    updated: &Timestamp,
    author: &Author,
) -> Result<Feed> {
    let window = Window::resolve(
        events,
        request.version,
        request.page_size,
        request.direction,
    );

    let entries = window
        .select(events)
        .map(|event| feed_entry(event, request, updated, author))
        .collect::<Result<Vec<_>>>()?;

    let self_url = request.stream_url();

    Ok(Feed {
        title: format!("Event stream '{}'", request.stream),
        id: self_url.clone(),
        updated: updated.clone(),
        stream_id: request.stream.clone(),
        author: author.clone(),
        head_of_stream: window.is_first(),
        self_url,
        links: build_links(request, &window),
        entries,
    })
}

fn feed_entry(
    event: &Event,
    request: &FeedRequest,
    updated: &Timestamp,
    author: &Author,
) -> Result<FeedEntry> {
    let id = event
        .self_uri()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/{}", request.stream_url(), event.event_number));

    Ok(FeedEntry {
        title: event.title(),
        id: id.clone(),
        updated: updated.clone(),
        author: author.clone(),
        summary: event.event_type.clone(),
        content: serde_json::to_value(event)?,
        links: vec![
            FeedLink::new(LinkRelation::Edit, id.clone()),
            FeedLink::new(LinkRelation::Alternate, id),
        ],
    })
}

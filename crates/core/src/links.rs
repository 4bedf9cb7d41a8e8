//! Navigation links exposed by a feed page.

use esmock_types::{Direction, FeedLink, FeedRequest, LinkRelation, Version};

use crate::window::Window;

/// Build the links of the page `window` resolved for `request`.
///
/// `self`, `first`, `last` and `metadata` are always present. `next` walks
/// toward older events and disappears once event 0 is on the page. `previous`
/// walks toward newer events and disappears when the requested version is
/// already past the newest event.
pub fn build_links(request: &FeedRequest, window: &Window) -> Vec<FeedLink> {
    let mut links = vec![
        FeedLink::new(LinkRelation::SelfLink, request.stream_url()),
        FeedLink::new(
            LinkRelation::First,
            request.page_url(Version::Head, Direction::Backward),
        ),
        FeedLink::new(
            LinkRelation::Last,
            request.page_url(Version::Number(0), Direction::Forward),
        ),
    ];

    // An empty window keeps its start, so for a read past the head this is
    // the requested version minus one.
    if let Some(older) = window.range().start.checked_sub(1) {
        links.push(FeedLink::new(
            LinkRelation::Next,
            request.page_url(Version::Number(older), Direction::Backward),
        ));
    }

    if !window.is_past_head() {
        links.push(FeedLink::new(
            LinkRelation::Previous,
            request.page_url(Version::Number(window.range().end), Direction::Forward),
        ));
    }

    links.push(FeedLink::new(LinkRelation::Metadata, request.metadata_url()));
    links
}

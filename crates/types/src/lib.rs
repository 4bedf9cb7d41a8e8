//! Data model shared by the esmock simulator and its callers: events, parsed
//! feed requests, and the Atom documents served for them.

pub mod event;
pub mod feed;
pub mod request;
pub mod time;

pub use event::{EDIT_RELATION, Event, EventLink, STREAM_RELATION};
pub use feed::{Author, EventAtomResponse, Feed, FeedEntry, FeedLink, LinkRelation};
pub use request::{
    DEFAULT_PAGE_SIZE, Direction, FeedRequest, HEAD_SEGMENT, UnknownDirection, Version,
};
pub use time::Timestamp;

//! Atom documents served by the simulator, in Event Store's JSON shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::time::Timestamp;

/// Author reported on every feed and entry
pub const DEFAULT_AUTHOR: &str = "EventStore";

/// Link relations used in feeds and entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRelation {
    #[serde(rename = "self")]
    SelfLink,
    First,
    Last,
    Next,
    Previous,
    Metadata,
    Edit,
    Alternate,
}

impl LinkRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRelation::SelfLink => "self",
            LinkRelation::First => "first",
            LinkRelation::Last => "last",
            LinkRelation::Next => "next",
            LinkRelation::Previous => "previous",
            LinkRelation::Metadata => "metadata",
            LinkRelation::Edit => "edit",
            LinkRelation::Alternate => "alternate",
        }
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A navigational link on a feed or entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedLink {
    #[serde(rename = "relation")]
    pub rel: LinkRelation,
    #[serde(rename = "uri")]
    pub href: String,
}

impl FeedLink {
    pub fn new(rel: LinkRelation, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// One event as it appears inside a feed page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub id: String,
    pub updated: Timestamp,
    pub author: Author,
    pub summary: String,
    /// The marshaled event
    pub content: JsonValue,
    #[serde(default)]
    pub links: Vec<FeedLink>,
}

/// A page of a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub title: String,
    pub id: String,
    pub updated: Timestamp,
    pub stream_id: String,
    pub author: Author,
    /// True when the page contains the newest known event, or the reader is past it
    pub head_of_stream: bool,
    pub self_url: String,
    pub links: Vec<FeedLink>,
    /// Newest first
    pub entries: Vec<FeedEntry>,
}

impl Feed {
    /// Href of the link with relation `rel`, if the page exposes one
    pub fn link(&self, rel: LinkRelation) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == rel)
            .map(|l| l.href.as_str())
    }
}

/// Document returned when a single event is fetched by its URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAtomResponse {
    pub title: String,
    pub id: String,
    pub updated: Timestamp,
    pub summary: String,
    pub content: JsonValue,
}

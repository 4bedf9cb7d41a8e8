use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Page size used when a request names a stream without paging segments
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Path segment naming the newest event of a stream
pub const HEAD_SEGMENT: &str = "head";

/// Position a feed page is requested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// An explicit zero-based event number
    Number(u64),
    /// Whatever the newest event of the stream is at resolution time
    Head,
}

impl Version {
    /// Resolve against a stream of `len` events.
    ///
    /// `Head` maps to the newest event number, or 0 for an empty stream.
    pub fn resolve(self, len: u64) -> u64 {
        match self {
            Version::Number(n) => n,
            Version::Head => len.saturating_sub(1),
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::Number(0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Number(n) => write!(f, "{}", n),
            Version::Head => f.write_str(HEAD_SEGMENT),
        }
    }
}

/// Direction a page is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward higher event numbers
    Forward,
    /// Toward lower event numbers
    #[default]
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forward" => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            other => Err(UnknownDirection(other.to_string())),
        }
    }
}

/// A feed request decoded from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Scheme and authority, e.g. `http://localhost:2113`. Empty for bare paths.
    pub host: String,
    pub stream: String,
    pub version: Version,
    pub direction: Direction,
    pub page_size: u64,
}

impl FeedRequest {
    /// A request for the default page of `stream`
    pub fn new(host: impl Into<String>, stream: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            stream: stream.into(),
            version: Version::default(),
            direction: Direction::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page(mut self, version: Version, direction: Direction, page_size: u64) -> Self {
        self.version = version;
        self.direction = direction;
        self.page_size = page_size;
        self
    }

    /// `{host}/streams/{stream}`
    pub fn stream_url(&self) -> String {
        format!("{}/streams/{}", self.host, self.stream)
    }

    /// `{host}/streams/{stream}/metadata`
    pub fn metadata_url(&self) -> String {
        format!("{}/metadata", self.stream_url())
    }

    /// URL of the page at `version` read in `direction`, keeping this request's page size
    pub fn page_url(&self, version: Version, direction: Direction) -> String {
        format!(
            "{}/{}/{}/{}",
            self.stream_url(),
            version,
            direction,
            self.page_size
        )
    }
}

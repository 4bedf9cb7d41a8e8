//! Selection of the events that make up one feed page.
//!
//! A window is a contiguous run of event numbers `[low, high]` plus three
//! boundary flags:
//!
//! - `is_first`: the window reaches the newest event of the stream
//! - `is_last`: the window reaches event 0
//! - `is_head`: a forward read reached the newest event, or asked for a
//!   position past it (the reader is polling for new events)

use std::ops::Range;

use esmock_types::{Direction, Event, Version};

/// Boundary flags of a resolved window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Boundary {
    is_first: bool,
    is_last: bool,
    is_head: bool,
}

impl Boundary {
    fn forward(start: u64, end: u64, stream_len: u64, requested: u64) -> Self {
        if requested >= stream_len {
            return Self {
                is_first: true,
                is_last: false,
                is_head: true,
            };
        }

        let is_first = end == stream_len;
        Self {
            is_first,
            is_last: start == 0,
            is_head: is_first,
        }
    }

    fn backward(start: u64, end: u64, stream_len: u64) -> Self {
        Self {
            is_first: end == stream_len,
            is_last: start == 0,
            is_head: false,
        }
    }
}

/// The slice of a stream selected by one paged read.
///
/// Bounds are kept as a half-open range `start..end` over event numbers. An
/// empty window still records where it sits, so neighbouring pages can be
/// addressed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    start: u64,
    end: u64,
    requested: u64,
    stream_len: u64,
    boundary: Boundary,
}

impl Window {
    /// Resolve the window for a read of `page_size` events from `version` in `direction`.
    pub fn resolve(
        events: &[Event],
        version: Version,
        page_size: u64,
        direction: Direction,
    ) -> Self {
        let stream_len = events.len() as u64;
        let requested = version.resolve(stream_len);

        let (start, end, boundary) = match direction {
            Direction::Forward => {
                let start = requested;
                let end = requested
                    .saturating_add(page_size)
                    .min(stream_len)
                    .max(start);
                (start, end, Boundary::forward(start, end, stream_len, requested))
            }
            Direction::Backward => {
                let end = requested.saturating_add(1).min(stream_len);
                let start = requested
                    .saturating_add(1)
                    .saturating_sub(page_size)
                    .min(end);
                (start, end, Boundary::backward(start, end, stream_len))
            }
        };

        Self {
            start,
            end,
            requested,
            stream_len,
            boundary,
        }
    }

    pub fn is_first(&self) -> bool {
        self.boundary.is_first
    }

    pub fn is_last(&self) -> bool {
        self.boundary.is_last
    }

    pub fn is_head(&self) -> bool {
        self.boundary.is_head
    }

    /// Lowest event number in the window
    pub fn low(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Highest event number in the window
    pub fn high(&self) -> Option<u64> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    /// Event numbers covered, as a half-open range
    pub fn range(&self) -> Range<u64> {
        self.start..self.end
    }

    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The version the read started from, with `head` already resolved
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// True when the requested version lies past the newest event
    pub fn is_past_head(&self) -> bool {
        self.requested >= self.stream_len
    }

    /// The events of this window, newest first
    pub fn select<'a>(&self, events: &'a [Event]) -> impl Iterator<Item = &'a Event> + use<'a> {
        events
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
            .iter()
            .rev()
    }
}

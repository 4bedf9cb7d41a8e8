//! Decoding of request URLs into feed and metadata requests.
//!
//! Accepted shapes, either as absolute URLs or bare paths:
//!
//! ```text
//! /streams/{stream}
//! /streams/{stream}/{version|head}/{forward|backward}/{pageSize}
//! /streams/{stream}/metadata
//! ```

use esmock_types::{Direction, FeedRequest, HEAD_SEGMENT, Version};
use url::Url;

use crate::error::{Result, SimulatorError};

const STREAMS_SEGMENT: &str = "streams";
const METADATA_SEGMENT: &str = "metadata";

/// A stream resource addressed by a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A page of the stream
    Feed(FeedRequest),
    /// The stream's metadata document
    Metadata { host: String, stream: String },
}

/// Parse a feed request URL.
///
/// A URL naming only the stream gets the default page: version 0, read
/// backward, 20 events.
pub fn parse_url(url: &str) -> Result<FeedRequest> {
    match parse_resource(url)? {
        Resource::Feed(request) => Ok(request),
        Resource::Metadata { .. } => Err(SimulatorError::ParseError(format!(
            "{} addresses stream metadata, not a feed page",
            url
        ))),
    }
}

/// Parse any stream resource URL.
pub fn parse_resource(url: &str) -> Result<Resource> {
    let (origin, path) = split_url(url)?;

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let streams_idx = segments
        .iter()
        .position(|s| *s == STREAMS_SEGMENT)
        .ok_or_else(|| SimulatorError::ParseError(format!("no streams segment in {}", url)))?;

    // Anything between the authority and `/streams` is kept as part of the host
    let mut host = origin;
    for prefix in &segments[..streams_idx] {
        host.push('/');
        host.push_str(prefix);
    }

    let stream = segments
        .get(streams_idx + 1)
        .ok_or_else(|| SimulatorError::ParseError(format!("no stream name in {}", url)))
        .and_then(|segment| decode_segment(segment))?;

    match &segments[streams_idx + 2..] {
        [] => Ok(Resource::Feed(FeedRequest::new(host, stream))),
        [segment] if *segment == METADATA_SEGMENT => Ok(Resource::Metadata { host, stream }),
        [version, direction, page_size] => {
            let request = FeedRequest::new(host, stream).with_page(
                parse_version(version)?,
                parse_direction(direction)?,
                parse_page_size(page_size)?,
            );
            Ok(Resource::Feed(request))
        }
        rest => Err(SimulatorError::ParseError(format!(
            "unexpected path segments {:?} in {}",
            rest, url
        ))),
    }
}

/// Split a URL into its origin (`scheme://authority`, empty for bare paths) and path.
fn split_url(url: &str) -> Result<(String, String)> {
    if url.starts_with('/') {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        return Ok((String::new(), path.to_string()));
    }

    let parsed =
        Url::parse(url).map_err(|e| SimulatorError::ParseError(format!("{}: {}", url, e)))?;
    if !parsed.has_host() {
        return Err(SimulatorError::ParseError(format!("no host in {}", url)));
    }

    Ok((
        parsed.origin().ascii_serialization(),
        parsed.path().to_string(),
    ))
}

/// Percent-decode a path segment, so `my%20stream` names the stream `my stream`.
fn decode_segment(segment: &str) -> Result<String> {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| SimulatorError::ParseError(format!("invalid segment {}: {}", segment, e)))
}

fn parse_version(segment: &str) -> Result<Version> {
    if segment == HEAD_SEGMENT {
        return Ok(Version::Head);
    }

    if let Ok(n) = segment.parse::<u64>() {
        return Ok(Version::Number(n));
    }

    match segment.parse::<i64>() {
        Ok(n) if n < 0 => Err(SimulatorError::InvalidVersion(n)),
        _ => Err(SimulatorError::ParseError(format!(
            "invalid version segment: {}",
            segment
        ))),
    }
}

fn parse_direction(segment: &str) -> Result<Direction> {
    segment
        .parse()
        .map_err(|e: esmock_types::UnknownDirection| SimulatorError::ParseError(e.to_string()))
}

fn parse_page_size(segment: &str) -> Result<u64> {
    segment
        .parse()
        .map_err(|_| SimulatorError::ParseError(format!("invalid page size: {}", segment)))
}

#[cfg(test)]
mod tests {
    use esmock_types::DEFAULT_PAGE_SIZE;

    use super::*;

    const SRV: &str = "http://localhost:2113";
    const STREAM: &str = "An-Qw3334rd-St333";

    #[test]
    fn test_parse_url_versioned() {
        let url = format!("{}/streams/{}/{}/{}/{}", SRV, STREAM, 50, "backward", 10);

        let request = parse_url(&url).unwrap();

        assert_eq!(request.host, SRV);
        assert_eq!(request.stream, STREAM);
        assert_eq!(request.version, Version::Number(50));
        assert_eq!(request.direction, Direction::Backward);
        assert_eq!(request.page_size, 10);
    }

    #[test]
    fn test_parse_url_base() {
        let url = format!("{}/streams/{}", SRV, STREAM);

        let request = parse_url(&url).unwrap();

        assert_eq!(request.host, SRV);
        assert_eq!(request.stream, STREAM);
        assert_eq!(request.version, Version::Number(0));
        assert_eq!(request.direction, Direction::Backward);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_parse_url_head() {
        let url = format!("{}/streams/{}/head/backward/100", SRV, STREAM);

        let request = parse_url(&url).unwrap();

        assert_eq!(request.host, SRV);
        assert_eq!(request.version, Version::Head);
        assert_eq!(request.direction, Direction::Backward);
        assert_eq!(request.page_size, 100);
    }

    #[test]
    fn test_parse_url_invalid_version() {
        let result = parse_url("/streams/s/-1/backward/20");
        assert_eq!(result, Err(SimulatorError::InvalidVersion(-1)));

        let url = format!("{}/streams/{}/-1/backward/20", SRV, STREAM);
        assert_eq!(parse_url(&url), Err(SimulatorError::InvalidVersion(-1)));
    }

    #[test]
    fn test_parse_url_bare_path() {
        let request = parse_url("/streams/orders/3/forward/5").unwrap();

        assert_eq!(request.host, "");
        assert_eq!(request.stream, "orders");
        assert_eq!(request.version, Version::Number(3));
        assert_eq!(request.direction, Direction::Forward);
        assert_eq!(request.page_size, 5);
    }

    #[test]
    fn test_parse_url_keeps_path_prefix_in_host() {
        let request = parse_url("http://proxy:8080/es/streams/orders").unwrap();
        assert_eq!(request.host, "http://proxy:8080/es");
        assert_eq!(request.stream_url(), "http://proxy:8080/es/streams/orders");
    }

    #[test]
    fn test_parse_url_passes_page_size_through() {
        let request = parse_url("/streams/orders/0/forward/0").unwrap();
        assert_eq!(request.page_size, 0);
    }

    #[test]
    fn test_parse_url_malformed() {
        for url in [
            "/streams/orders/abc/forward/20",
            "/streams/orders/1/sideways/20",
            "/streams/orders/1/forward/-20",
            "/streams/orders/1/forward",
            "/streams/orders/1/forward/20/extra",
            "/streams",
            "/things/orders",
            "not a url",
        ] {
            assert!(
                matches!(parse_url(url), Err(SimulatorError::ParseError(_))),
                "expected parse error for {}",
                url
            );
        }
    }

    #[test]
    fn test_parse_url_decodes_stream_name() {
        let request = parse_url("http://h/streams/my%20stream/head/backward/20").unwrap();
        assert_eq!(request.stream, "my stream");
        assert_eq!(request.host, "http://h");

        let request = parse_url("/streams/a%2Fb").unwrap();
        assert_eq!(request.stream, "a/b");

        assert!(matches!(
            parse_url("/streams/bad%FF/head/backward/20"),
            Err(SimulatorError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_resource_metadata() {
        let resource = parse_resource("http://localhost:2113/streams/orders/metadata").unwrap();
        assert_eq!(
            resource,
            Resource::Metadata {
                host: SRV.to_string(),
                stream: "orders".to_string(),
            }
        );

        assert!(matches!(
            parse_url("/streams/orders/metadata"),
            Err(SimulatorError::ParseError(_))
        ));
    }
}

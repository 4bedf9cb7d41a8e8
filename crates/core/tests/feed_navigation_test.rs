//! Drives a real HTTP client through the simulator's feeds.

use esmock_core::{
    AtomFeedSimulator, SimulatorOptions, SimulatorServer,
    testdata::create_test_events,
    types::{Feed, LinkRelation},
};
use reqwest::StatusCode;
use serde_json::{Value as JsonValue, json};

async fn start(count: u64, stream: &str, page_metadata: JsonValue) -> SimulatorServer {
    let stream = stream.to_string();
    SimulatorServer::start(move |base_url| {
        let events = create_test_events(count, &stream, base_url, &["Created", "Updated"]);
        let options = SimulatorOptions::default().with_stream_metadata(stream, page_metadata);
        AtomFeedSimulator::new(events, options)
    })
    .await
    .unwrap()
}

async fn get_feed(client: &reqwest::Client, url: &str) -> Feed {
    let response = client.get(url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", url);
    response.json().await.unwrap()
}

fn event_numbers(feed: &Feed) -> Vec<u64> {
    feed.entries
        .iter()
        .map(|e| e.content["eventNumber"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_walk_backward_from_head_to_first_event() {
    let server = start(95, "orders", json!({})).await;
    let client = reqwest::Client::new();

    let stream = get_feed(&client, &format!("{}/streams/orders", server.url())).await;
    let mut url = stream
        .link(LinkRelation::First)
        .unwrap()
        .replace("/20", "/10");

    let mut seen = Vec::new();
    let mut pages = 0;
    loop {
        let feed = get_feed(&client, &url).await;
        pages += 1;
        seen.extend(event_numbers(&feed));
        match feed.link(LinkRelation::Next) {
            Some(next) => url = next.to_string(),
            None => break,
        }
    }

    assert_eq!(pages, 10);
    assert_eq!(seen, (0..95).rev().collect::<Vec<_>>());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_walk_forward_from_last_to_head() {
    let server = start(45, "orders", json!({})).await;
    let client = reqwest::Client::new();

    let head = get_feed(&client, &format!("{}/streams/orders/head/backward/20", server.url())).await;
    assert_eq!(
        head.link(LinkRelation::Last),
        Some(format!("{}/streams/orders/0/forward/20", server.url()).as_str())
    );

    let mut url = head.link(LinkRelation::Last).unwrap().to_string();
    let mut seen = Vec::new();
    loop {
        let feed = get_feed(&client, &url).await;
        let mut numbers = event_numbers(&feed);
        numbers.reverse();
        seen.extend(numbers);
        if feed.head_of_stream {
            break;
        }
        url = feed.link(LinkRelation::Previous).unwrap().to_string();
    }

    assert_eq!(seen, (0..45).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_follow_entry_to_single_event() {
    let server = start(30, "orders", json!({})).await;
    let client = reqwest::Client::new();

    let feed = get_feed(&client, &format!("{}/streams/orders/head/backward/5", server.url())).await;
    let entry = &feed.entries[2];

    let response = client.get(&entry.id).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        esmock_core::ATOM_JSON_CONTENT_TYPE
    );

    let event: JsonValue = response.json().await.unwrap();
    assert_eq!(event["title"], "27@orders");
    assert_eq!(event["summary"], "Updated");
    assert_eq!(event["content"]["eventStreamId"], "orders");
    assert_eq!(event["content"]["eventNumber"], 27);
}

#[tokio::test]
async fn test_metadata_link_serves_stream_metadata() {
    let server = start(3, "orders", json!({ "$maxCount": 1000 })).await;
    let client = reqwest::Client::new();

    let feed = get_feed(&client, &format!("{}/streams/orders", server.url())).await;
    let metadata: JsonValue = client
        .get(feed.link(LinkRelation::Metadata).unwrap())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(metadata, json!({ "$maxCount": 1000 }));
}

#[tokio::test]
async fn test_error_statuses() {
    let server = start(10, "orders", json!({})).await;
    let client = reqwest::Client::new();

    for (path, status) in [
        ("/streams/orders/-5/forward/20", StatusCode::BAD_REQUEST),
        ("/streams/orders/ten/forward/20", StatusCode::BAD_REQUEST),
        ("/streams/orders/0/forward", StatusCode::BAD_REQUEST),
        ("/streams/unknown/head/backward/20", StatusCode::NOT_FOUND),
        ("/streams/orders/10/", StatusCode::BAD_REQUEST),
    ] {
        let response = client
            .get(format!("{}{}", server.url(), path))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), status, "GET {}", path);
    }
}

#[tokio::test]
async fn test_read_past_head_is_empty() {
    let server = start(10, "orders", json!({})).await;
    let client = reqwest::Client::new();

    let feed = get_feed(&client, &format!("{}/streams/orders/10/forward/20", server.url())).await;

    assert!(feed.entries.is_empty());
    assert!(feed.head_of_stream);
    assert_eq!(feed.link(LinkRelation::Previous), None);
    assert_eq!(
        feed.link(LinkRelation::Next),
        Some(format!("{}/streams/orders/9/backward/20", server.url()).as_str())
    );
}

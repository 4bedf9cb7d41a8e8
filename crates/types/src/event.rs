use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Relation of an event's link to the event itself
pub const EDIT_RELATION: &str = "edit";
/// Relation of an event's link to the stream that contains it
pub const STREAM_RELATION: &str = "stream";

/// A link carried by an event, in Event Store's `{uri, relation}` shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    pub uri: String,
    pub relation: String,
}

impl EventLink {
    pub fn new(uri: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            relation: relation.into(),
        }
    }
}

/// An event recorded in a stream.
///
/// Events are built once by the test-data generator (or by the caller) and never
/// mutated afterwards. Within one stream `event_number` starts at 0 and has no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "eventStreamId")]
    pub stream: String,
    pub event_number: u64,
    pub event_type: String,
    pub event_id: Uuid,
    /// Opaque payload
    pub data: JsonValue,
    /// Opaque metadata
    #[serde(rename = "metaData", default, skip_serializing_if = "JsonValue::is_null")]
    pub metadata: JsonValue,
    #[serde(default)]
    pub links: Vec<EventLink>,
}

impl Event {
    /// The URI identifying this event.
    ///
    /// This is the `edit` link when present, otherwise the first link.
    pub fn self_uri(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.relation == EDIT_RELATION)
            .or_else(|| self.links.first())
            .map(|l| l.uri.as_str())
    }

    /// The URI of the stream this event belongs to, when the event carries one
    pub fn stream_uri(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.relation == STREAM_RELATION)
            .map(|l| l.uri.as_str())
    }

    /// Title used for this event in Atom documents: `{event_number}@{stream}`
    pub fn title(&self) -> String {
        format!("{}@{}", self.event_number, self.stream)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event_with_links(links: Vec<EventLink>) -> Event {
        Event {
            stream: "orders".to_string(),
            event_number: 7,
            event_type: "OrderPlaced".to_string(),
            event_id: Uuid::new_v4(),
            data: json!({ "id": 7 }),
            metadata: JsonValue::Null,
            links,
        }
    }

    #[test]
    fn test_self_uri_prefers_edit_link() {
        let event = event_with_links(vec![
            EventLink::new("http://host/streams/orders", STREAM_RELATION),
            EventLink::new("http://host/streams/orders/7/", EDIT_RELATION),
        ]);
        assert_eq!(event.self_uri(), Some("http://host/streams/orders/7/"));
        assert_eq!(event.stream_uri(), Some("http://host/streams/orders"));
    }

    #[test]
    fn test_self_uri_falls_back_to_first_link() {
        let event = event_with_links(vec![EventLink::new("http://host/x/7", "alternate")]);
        assert_eq!(event.self_uri(), Some("http://host/x/7"));

        let event = event_with_links(vec![]);
        assert_eq!(event.self_uri(), None);
    }

    #[test]
    fn test_title() {
        let event = event_with_links(vec![]);
        assert_eq!(event.title(), "7@orders");
    }

    #[test]
    fn test_event_store_field_names() {
        let event = event_with_links(vec![EventLink::new("u", EDIT_RELATION)]);
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["eventStreamId"], "orders");
        assert_eq!(value["eventNumber"], 7);
        assert_eq!(value["eventType"], "OrderPlaced");
        assert_eq!(value["links"][0]["relation"], "edit");
        // Null metadata is omitted
        assert!(value.get("metaData").is_none());
    }
}

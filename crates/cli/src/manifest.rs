use std::{fs, path::Path};

use esmock_core::{
    SimulatorOptions,
    testdata::{DEFAULT_EVENT_TYPE, create_test_event, create_test_events},
    types::Event,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Simulator manifest file (esmock.yaml)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Manifest {
    /// Streams served by the simulator
    #[serde(default)]
    pub streams: Vec<StreamManifest>,
}

impl Manifest {
    /// Load manifest from the specified esmock.yaml file path
    pub fn load(manifest_file_path: &Path) -> Result<Self, String> {
        if !manifest_file_path.exists() {
            return Err(format!(
                "esmock.yaml not found at {}",
                manifest_file_path.display()
            ));
        }

        let content = fs::read_to_string(manifest_file_path)
            .map_err(|e| format!("Failed to read {}: {}", manifest_file_path.display(), e))?;

        Self::parse(&content)
            .map_err(|e| format!("Failed to parse {}: {}", manifest_file_path.display(), e))
    }

    /// Parse a manifest, rejecting streams that would serve no events
    pub fn parse(content: &str) -> Result<Self, String> {
        let manifest: Manifest = serde_yml::from_str(content).map_err(|e| e.to_string())?;

        if let Some(empty) = manifest.streams.iter().find(|s| s.is_empty()) {
            return Err(format!(
                "stream '{}' has no events; set `count` or list `events`",
                empty.name
            ));
        }

        Ok(manifest)
    }

    /// Materialize every stream's events, with URIs rooted at `host`
    pub fn events(&self, host: &str) -> Vec<Event> {
        self.streams.iter().flat_map(|s| s.events(host)).collect()
    }

    pub fn simulator_options(&self) -> SimulatorOptions {
        self.streams
            .iter()
            .filter_map(|s| s.metadata.clone().map(|m| (s.name.clone(), m)))
            .fold(SimulatorOptions::default(), |options, (name, metadata)| {
                options.with_stream_metadata(name, metadata)
            })
    }
}

/// One simulated stream.
///
/// Explicit `events` are numbered from 0 in the order given. Without them,
/// `count` synthetic events are generated with types taken from `event_types`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StreamManifest {
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub events: Vec<EventManifest>,
    /// Document served at `/streams/{name}/metadata`
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

impl StreamManifest {
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.events.is_empty()
    }

    pub fn events(&self, host: &str) -> Vec<Event> {
        if self.events.is_empty() {
            let event_types: Vec<&str> = self.event_types.iter().map(String::as_str).collect();
            return create_test_events(self.count, &self.name, host, &event_types);
        }

        self.events
            .iter()
            .zip(0u64..)
            .map(|(event, number)| {
                create_test_event(
                    &self.name,
                    host,
                    number,
                    event.event_type.as_deref().unwrap_or(DEFAULT_EVENT_TYPE),
                    event.data.clone(),
                    event.metadata.clone(),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventManifest {
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub data: JsonValue,
    #[serde(default)]
    pub metadata: JsonValue,
}

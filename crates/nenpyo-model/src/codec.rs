//! Document codec — full-document JSON interchange.
//!
//! A document is one self-contained JSON object: scenario, time nodes,
//! events, and presentation theme. Export is a lossless snapshot
//! (transient `expanded` flags included as-is); import validates shape
//! before anything is replaced, defaults missing scenario sub-fields,
//! forces every event collapsed, and shallow-merges the theme over
//! defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use nenpyo_types::{Event, Scenario, TimeNode};

use crate::error::CodecError;
use crate::store::Store;

/// Presentation settings. Opaque to the core: a flat string→value map,
/// shallow-merged over [`Theme::default`] on import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub serde_json::Map<String, Value>);

impl Default for Theme {
    fn default() -> Self {
        let mut map = serde_json::Map::new();
        map.insert("mode".to_string(), Value::from("dark"));
        map.insert("accent".to_string(), Value::from("#3B82F6"));
        map.insert("lineColor".to_string(), Value::from("#4B5563"));
        map.insert("background".to_string(), Value::from("#111827"));
        Self(map)
    }
}

impl Theme {
    /// Defaults with this theme's entries layered on top (shallow).
    pub fn merged_over_defaults(&self) -> Theme {
        let mut merged = Theme::default();
        for (key, value) in &self.0 {
            merged.0.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Look up one setting.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// The complete interchange document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub scenario: Scenario,
    #[serde(rename = "timeNodes")]
    pub time_nodes: Vec<TimeNode>,
    pub events: Vec<Event>,
    #[serde(default)]
    pub theme: Theme,
}

/// Parse and validate an imported document.
///
/// Shape checks run against the raw JSON first, so each rejection carries
/// a specific user-facing message; nothing is accepted until the whole
/// payload deserializes. On acceptance every event is forced collapsed
/// and the theme is merged over defaults.
pub fn parse_document(raw: &str) -> Result<Document, CodecError> {
    let value: Value = serde_json::from_str(raw)?;
    let Some(object) = value.as_object() else {
        return Err(CodecError::NotAnObject);
    };
    if !object.contains_key("scenario") {
        return Err(CodecError::MissingScenario);
    }
    if !object.get("timeNodes").is_some_and(|v| v.is_array()) {
        return Err(CodecError::MissingTimeNodes);
    }
    if !object.get("events").is_some_and(|v| v.is_array()) {
        return Err(CodecError::MissingEvents);
    }

    let mut document: Document = serde_json::from_value(value)?;
    for event in &mut document.events {
        event.expanded = false; // imported documents never open expanded
    }
    document.theme = document.theme.merged_over_defaults();
    Ok(document)
}

/// Serialize a document to pretty-printed JSON.
pub fn to_json(document: &Document) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(document)?)
}

impl Store {
    /// Snapshot the whole store as an interchange document.
    pub fn to_document(&self) -> Document {
        Document {
            scenario: self.scenario.clone(),
            time_nodes: self.nodes.clone(),
            events: self.events.clone(),
            theme: self.theme.clone(),
        }
    }

    /// Replace the store's contents with a loaded document.
    pub fn load_document(&mut self, document: Document) {
        self.scenario = document.scenario;
        self.nodes = document.time_nodes;
        self.events = document.events;
        self.theme = document.theme;
        self.version += 1;
    }

    /// Export the current document as JSON. Lossless snapshot.
    pub fn export_json(&self) -> Result<String, CodecError> {
        to_json(&self.to_document())
    }

    /// Import a JSON document, replacing the current contents.
    ///
    /// On any rejection the current in-memory document is untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<(), CodecError> {
        let document = parse_document(raw)?;
        self.load_document(document);
        Ok(())
    }
}

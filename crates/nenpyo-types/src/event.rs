//! Events — narrative beats attached to time nodes.
//!
//! An `Event` belongs to exactly one `TimeNode` and carries an `order`
//! that is unique within its `(node_id, attached)` partition. The stored
//! [`Placement`] is a *preference*; the actual visual [`Side`] is resolved
//! per render by the position resolver and never written back.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::{EventId, NodeId};

/// Prominence of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum EventKind {
    /// Prominent card, participates in left/right alternation.
    #[default]
    Main,
    /// Compact note, always rendered center.
    Sub,
}

impl EventKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Main => "main",
            EventKind::Sub => "sub",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stored side preference. `Auto` defers to the alternation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Placement {
    /// Alternate right/left by position among auto siblings.
    #[default]
    Auto,
    Left,
    Right,
    Center,
}

impl Placement {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Placement::Auto => "auto",
            Placement::Left => "left",
            Placement::Right => "right",
            Placement::Center => "center",
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved visual side. Derived per render, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Center,
}

/// A narrative beat.
///
/// Wire field names match the document interchange format
/// (`timeNodeId`, `type`, `position`, `attachedToTimeNode`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Owning time node — required, never null.
    #[serde(rename = "timeNodeId")]
    pub node_id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    /// Character *name*, not id — a deliberate denormalization. Deleting a
    /// character orphans this label; it still displays, with a fallback color.
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "position", default)]
    pub placement: Placement,
    /// Transient UI state; forced to `false` on import.
    #[serde(default)]
    pub expanded: bool,
    /// True places the event beside the node marker instead of in the
    /// node's event list. Attached events are their own ordering partition.
    #[serde(rename = "attachedToTimeNode", default)]
    pub attached: bool,
    /// Position within the `(node_id, attached)` partition.
    pub order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(node_id: NodeId) -> Event {
        Event {
            id: EventId::new(),
            node_id,
            kind: EventKind::Main,
            character: "Akiko".to_string(),
            title: "The letter arrives".to_string(),
            content: String::new(),
            placement: Placement::Auto,
            expanded: false,
            attached: false,
            order: 0,
        }
    }

    #[test]
    fn test_event_wire_field_names() {
        let event = sample(NodeId::new());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "main");
        assert_eq!(json["position"], "auto");
        assert_eq!(json["attachedToTimeNode"], false);
        assert!(json["timeNodeId"].is_string());
    }

    #[test]
    fn test_event_deserialize_defaults() {
        let json = serde_json::json!({
            "id": EventId::new(),
            "timeNodeId": NodeId::new(),
            "order": 3,
        });
        let event: Event = serde_json::from_value(json).unwrap();
        assert_eq!(event.kind, EventKind::Main);
        assert_eq!(event.placement, Placement::Auto);
        assert!(!event.expanded);
        assert!(!event.attached);
        assert_eq!(event.order, 3);
    }

    #[test]
    fn test_kind_and_placement_tags() {
        assert_eq!(EventKind::from_str("sub"), Some(EventKind::Sub));
        assert_eq!(Placement::from_str("LEFT"), Some(Placement::Left));
        assert_eq!(Placement::Center.as_str(), "center");
    }
}

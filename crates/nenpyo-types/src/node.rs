//! Time nodes — the branching skeleton of the timeline.
//!
//! A `TimeNode` marks a point or period in story time. Nodes form a forest
//! via `parent_id`; sibling order within one parent group is given by
//! `order` (strictly increasing, gaps allowed, never comparable across
//! groups). The forest/order invariants are enforced by the store and the
//! reordering engine, not here — this is plain data.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::NodeId;

/// What a node's time label means.
///
/// Deliberately an *open* tag: the known variants cover the built-in form
/// inputs, and anything else round-trips verbatim through `Other` so
/// imported documents with custom tags are never mangled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeKind {
    /// A calendar year (e.g. "1923").
    Year,
    /// A calendar date.
    Date,
    /// A clock time; the node value is formatted `"AM|PM HH:MM"`.
    Time,
    /// Free-form label ("Day 1", "The Siege", …).
    Custom,
    /// Miscellaneous marker.
    Etc,
    /// Unknown tag from an imported document, preserved as-is.
    Other(String),
}

impl TimeKind {
    /// The wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            TimeKind::Year => "year",
            TimeKind::Date => "date",
            TimeKind::Time => "time",
            TimeKind::Custom => "custom",
            TimeKind::Etc => "etc",
            TimeKind::Other(s) => s,
        }
    }

    /// Whether this node's value is a formatted clock time.
    pub fn is_clock(&self) -> bool {
        matches!(self, TimeKind::Time)
    }
}

impl From<String> for TimeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "year" => TimeKind::Year,
            "date" => TimeKind::Date,
            "time" => TimeKind::Time,
            "custom" => TimeKind::Custom,
            "etc" => TimeKind::Etc,
            _ => TimeKind::Other(s),
        }
    }
}

impl From<TimeKind> for String {
    fn from(k: TimeKind) -> String {
        k.as_str().to_string()
    }
}

impl std::fmt::Display for TimeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display weight of a node marker. Presentation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum NodeSize {
    /// Compact marker.
    #[default]
    Small,
    /// Emphasized marker.
    Large,
}

impl NodeSize {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeSize::Small => "small",
            NodeSize::Large => "large",
        }
    }
}

impl std::fmt::Display for NodeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A node in the timeline forest.
///
/// Wire field names match the document interchange format
/// (`timeType`, `timeValue`, `parentTimeNodeId`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeNode {
    pub id: NodeId,
    /// Meaning of `value` (open string tag).
    #[serde(rename = "timeType")]
    pub kind: TimeKind,
    /// Display string; `"AM|PM HH:MM"` when `kind` is [`TimeKind::Time`].
    #[serde(rename = "timeValue")]
    pub value: String,
    #[serde(default)]
    pub size: NodeSize,
    /// None = root of the forest.
    #[serde(rename = "parentTimeNodeId", default)]
    pub parent_id: Option<NodeId>,
    /// Sibling position within the `parent_id` group. Comparable only
    /// inside the same group.
    pub order: i64,
}

impl TimeNode {
    /// Check if this is a root node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_kind_known_tags() {
        assert_eq!(TimeKind::from("year".to_string()), TimeKind::Year);
        assert_eq!(TimeKind::from("time".to_string()), TimeKind::Time);
        assert_eq!(TimeKind::Year.as_str(), "year");
        assert!(TimeKind::Time.is_clock());
        assert!(!TimeKind::Custom.is_clock());
    }

    #[test]
    fn test_time_kind_open_tag_roundtrip() {
        let kind = TimeKind::from("moon-phase".to_string());
        assert_eq!(kind, TimeKind::Other("moon-phase".to_string()));

        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, "\"moon-phase\"");
        let back: TimeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_node_wire_field_names() {
        let node = TimeNode {
            id: NodeId::new(),
            kind: TimeKind::Custom,
            value: "Day 1".to_string(),
            size: NodeSize::Large,
            parent_id: None,
            order: 0,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["timeType"], "custom");
        assert_eq!(json["timeValue"], "Day 1");
        assert_eq!(json["size"], "large");
        assert!(json["parentTimeNodeId"].is_null());
    }

    #[test]
    fn test_node_size_defaults_small() {
        let json = serde_json::json!({
            "id": NodeId::new(),
            "timeType": "year",
            "timeValue": "1923",
            "order": 0,
        });
        let node: TimeNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.size, NodeSize::Small);
        assert!(node.is_root());
    }
}

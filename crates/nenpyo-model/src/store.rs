//! Entity store — canonical collections for one timeline document.
//!
//! Holds the scenario (with its character roster), the time-node forest,
//! and the event list. Every mutation is all-or-nothing: validation runs
//! first, then the full replacement collection is built and swapped in,
//! so a failed operation leaves the store untouched and no reader ever
//! observes a partially-mutated structure.
//!
//! Events are kept in insertion order; the position resolver depends on
//! that order for its alternation rule. Per-node display order comes from
//! the `order` field, not from list position.

use nenpyo_types::{
    Character, CharacterId, Event, EventId, EventKind, NodeId, NodeSize, Placement, Scenario,
    TimeKind, TimeNode,
};

use crate::codec::Theme;
use crate::error::ModelError;
use crate::tree::TimelineTree;
use crate::Result;

/// AM/PM half of a clock-time input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

impl Meridiem {
    /// Wire/display form ("AM" / "PM").
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    /// Parse from the display form.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AM" => Some(Meridiem::Am),
            "PM" => Some(Meridiem::Pm),
            _ => None,
        }
    }
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw form input for a time node's value.
///
/// Clock-type nodes are entered as three fields (meridiem, hour, minute);
/// every other kind takes a free-text value. [`TimeValueInput::format`]
/// validates and assembles the stored display string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeValueInput {
    /// Clock fields, stored as `"AM|PM HH:MM"` with zero-padding.
    Clock {
        meridiem: Meridiem,
        hour: String,
        minute: String,
    },
    /// Free-text value for year/date/custom/etc nodes.
    Text(String),
}

impl TimeValueInput {
    /// Validate and format into the stored display string.
    ///
    /// An empty hour (clock) or empty trimmed text is a blocking field
    /// error. An empty minute defaults to `"0"`.
    pub fn format(&self) -> Result<String> {
        match self {
            TimeValueInput::Clock {
                meridiem,
                hour,
                minute,
            } => {
                let hour = hour.trim();
                if hour.is_empty() {
                    return Err(ModelError::EmptyHour);
                }
                let minute = minute.trim();
                let minute = if minute.is_empty() { "0" } else { minute };
                Ok(format!("{} {:0>2}:{:0>2}", meridiem.as_str(), hour, minute))
            }
            TimeValueInput::Text(value) => {
                if value.trim().is_empty() {
                    return Err(ModelError::EmptyTimeValue);
                }
                Ok(value.clone())
            }
        }
    }

    /// Split a stored `"AM|PM HH:MM"` value back into clock fields, for
    /// repopulating an edit form. Returns None if the value doesn't match.
    pub fn parse_clock(value: &str) -> Option<(Meridiem, String, String)> {
        let (ampm, rest) = value.split_once(' ')?;
        let meridiem = Meridiem::from_str(ampm)?;
        let (hour, minute) = rest.split_once(':')?;
        if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some((meridiem, hour.to_string(), minute.to_string()))
    }
}

/// Form input for adding or editing a time node.
#[derive(Clone, Debug)]
pub struct NodeDraft {
    pub kind: TimeKind,
    pub value: TimeValueInput,
    pub size: NodeSize,
    pub parent_id: Option<NodeId>,
}

/// Form input for adding or editing an event.
///
/// `node_id` is optional here because "no time slot selected" is a
/// reportable field error, not a type-level impossibility.
#[derive(Clone, Debug)]
pub struct EventDraft {
    pub node_id: Option<NodeId>,
    pub kind: EventKind,
    pub character: String,
    pub title: String,
    pub content: String,
    pub placement: Placement,
}

/// Canonical collections for one document.
pub struct Store {
    pub(crate) scenario: Scenario,
    pub(crate) nodes: Vec<TimeNode>,
    pub(crate) events: Vec<Event>,
    pub(crate) theme: Theme,
    /// Bumped on every applied mutation.
    pub(crate) version: u64,
}

impl Store {
    /// Create an empty store with a default scenario and theme.
    pub fn new() -> Self {
        Self {
            scenario: Scenario::default(),
            nodes: Vec::new(),
            events: Vec::new(),
            theme: Theme::default(),
            version: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Scenario metadata and character roster.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// All time nodes, unsorted.
    pub fn nodes(&self) -> &[TimeNode] {
        &self.nodes
    }

    /// All events, in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Presentation settings (opaque to the core).
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Get the current version. Bumped on every applied mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Look up a time node by id.
    pub fn node(&self, id: NodeId) -> Option<&TimeNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up an event by id.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Number of time nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of events.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Events of one node and partition (regular list vs. attached),
    /// sorted by order.
    pub fn events_of(&self, node_id: NodeId, attached: bool) -> Vec<&Event> {
        let mut list: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.node_id == node_id && e.attached == attached)
            .collect();
        list.sort_by_key(|e| e.order);
        list
    }

    /// Build the ephemeral tree index for this store's forest.
    pub fn tree(&self) -> TimelineTree {
        TimelineTree::from_nodes(&self.nodes)
    }

    /// Color for a character name, with the orphan-label fallback.
    pub fn color_for(&self, name: &str) -> &str {
        self.scenario.color_for(name)
    }

    // =========================================================================
    // Scenario
    // =========================================================================

    /// Set the scenario title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.scenario.title = title.into();
        self.version += 1;
    }

    /// Set the scenario overview.
    pub fn set_overview(&mut self, overview: impl Into<String>) {
        self.scenario.overview = overview.into();
        self.version += 1;
    }

    /// Set the base year.
    pub fn set_base_year(&mut self, base_year: impl Into<String>) {
        self.scenario.base_year = base_year.into();
        self.version += 1;
    }

    // =========================================================================
    // Time nodes
    // =========================================================================

    /// Add a time node, appended after its siblings.
    pub fn add_node(&mut self, draft: NodeDraft) -> Result<NodeId> {
        let value = draft.value.format()?;
        if let Some(parent_id) = draft.parent_id {
            if self.node(parent_id).is_none() {
                return Err(ModelError::NodeNotFound(parent_id));
            }
        }

        let id = NodeId::new();
        let order = self.next_child_order(draft.parent_id);
        self.nodes.push(TimeNode {
            id,
            kind: draft.kind,
            value,
            size: draft.size,
            parent_id: draft.parent_id,
            order,
        });
        self.version += 1;
        Ok(id)
    }

    /// Replace a node's fields by id, keeping its sibling order.
    ///
    /// Rejects a parent selection that would make the node its own
    /// ancestor — the form's parent dropdown lists every node, including
    /// the edited node's descendants.
    pub fn edit_node(&mut self, id: NodeId, draft: NodeDraft) -> Result<()> {
        let value = draft.value.format()?;
        if self.node(id).is_none() {
            return Err(ModelError::NodeNotFound(id));
        }
        if let Some(parent_id) = draft.parent_id {
            if self.node(parent_id).is_none() {
                return Err(ModelError::NodeNotFound(parent_id));
            }
            if parent_id == id || self.tree().is_descendant(parent_id, id) {
                return Err(ModelError::CyclicParent(id));
            }
        }

        self.nodes = self
            .nodes
            .iter()
            .map(|node| {
                if node.id != id {
                    return node.clone();
                }
                TimeNode {
                    id,
                    kind: draft.kind.clone(),
                    value: value.clone(),
                    size: draft.size,
                    parent_id: draft.parent_id,
                    order: node.order,
                }
            })
            .collect();
        self.version += 1;
        Ok(())
    }

    /// Delete a node, its entire subtree, and every event referencing any
    /// removed node.
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        if self.node(id).is_none() {
            return Err(ModelError::NodeNotFound(id));
        }
        let doomed = self.tree().subtree_ids(id);
        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.events.retain(|e| !doomed.contains(&e.node_id));
        self.version += 1;
        Ok(())
    }

    /// Next sibling order under a parent: `max + 1`, or 0 for the first.
    pub(crate) fn next_child_order(&self, parent_id: Option<NodeId>) -> i64 {
        self.nodes
            .iter()
            .filter(|n| n.parent_id == parent_id)
            .map(|n| n.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Add an event, appended after the target node's existing events.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<EventId> {
        let node_id = self.validate_event_draft(&draft)?;

        let id = EventId::new();
        let order = self.append_order(node_id);
        self.events.push(Event {
            id,
            node_id,
            kind: draft.kind,
            character: draft.character,
            title: draft.title,
            content: draft.content,
            placement: draft.placement,
            expanded: false,
            attached: false,
            order,
        });
        self.version += 1;
        Ok(id)
    }

    /// Replace an event's fields by id, keeping order, attachment, and
    /// expansion state.
    pub fn edit_event(&mut self, id: EventId, draft: EventDraft) -> Result<()> {
        let node_id = self.validate_event_draft(&draft)?;
        if self.event(id).is_none() {
            return Err(ModelError::EventNotFound(id));
        }

        self.events = self
            .events
            .iter()
            .map(|event| {
                if event.id != id {
                    return event.clone();
                }
                Event {
                    id,
                    node_id,
                    kind: draft.kind,
                    character: draft.character.clone(),
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                    placement: draft.placement,
                    expanded: event.expanded,
                    attached: event.attached,
                    order: event.order,
                }
            })
            .collect();
        self.version += 1;
        Ok(())
    }

    /// Delete one event.
    pub fn delete_event(&mut self, id: EventId) -> Result<()> {
        if self.event(id).is_none() {
            return Err(ModelError::EventNotFound(id));
        }
        self.events.retain(|e| e.id != id);
        self.version += 1;
        Ok(())
    }

    /// Flip an event's transient expanded flag.
    pub fn toggle_expanded(&mut self, id: EventId) -> Result<()> {
        if self.event(id).is_none() {
            return Err(ModelError::EventNotFound(id));
        }
        self.events = self
            .events
            .iter()
            .map(|event| {
                let mut event = event.clone();
                if event.id == id {
                    event.expanded = !event.expanded;
                }
                event
            })
            .collect();
        self.version += 1;
        Ok(())
    }

    /// Blocking field checks for an event save: a time slot must be
    /// selected (and exist), and the title must be non-empty.
    fn validate_event_draft(&self, draft: &EventDraft) -> Result<NodeId> {
        let node_id = draft.node_id.ok_or(ModelError::MissingTimeNode)?;
        if self.node(node_id).is_none() {
            return Err(ModelError::NodeNotFound(node_id));
        }
        if draft.title.trim().is_empty() {
            return Err(ModelError::EmptyTitle);
        }
        Ok(node_id)
    }

    /// Append order for a node: `max + 1` over *all* of its events, both
    /// partitions, or 0 if it has none.
    pub(crate) fn append_order(&self, node_id: NodeId) -> i64 {
        self.events
            .iter()
            .filter(|e| e.node_id == node_id)
            .map(|e| e.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    // =========================================================================
    // Characters
    // =========================================================================

    /// Add a character to the roster.
    pub fn add_character(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<CharacterId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyCharacterName);
        }
        let id = CharacterId::new();
        self.scenario.characters.push(Character {
            id,
            name,
            color: color.into(),
        });
        self.version += 1;
        Ok(id)
    }

    /// Replace a character's name and color by id.
    ///
    /// Events keep the name string they were saved with — a rename leaves
    /// their labels pointing at the old name, which then falls back to the
    /// default color.
    pub fn edit_character(
        &mut self,
        id: CharacterId,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyCharacterName);
        }
        if !self.scenario.characters.iter().any(|c| c.id == id) {
            return Err(ModelError::CharacterNotFound(id));
        }
        let color = color.into();
        self.scenario.characters = self
            .scenario
            .characters
            .iter()
            .map(|character| {
                if character.id != id {
                    return character.clone();
                }
                Character {
                    id,
                    name: name.clone(),
                    color: color.clone(),
                }
            })
            .collect();
        self.version += 1;
        Ok(())
    }

    /// Remove a character. Does **not** cascade: events referencing the
    /// name keep their now-orphaned label.
    pub fn delete_character(&mut self, id: CharacterId) -> Result<()> {
        if !self.scenario.characters.iter().any(|c| c.id == id) {
            return Err(ModelError::CharacterNotFound(id));
        }
        self.scenario.characters.retain(|c| c.id != id);
        self.version += 1;
        Ok(())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

//! Timeline document model for nenpyo.
//!
//! One document is a scenario (metadata + character roster), a forest of
//! time nodes, and an ordered set of events. This crate owns the rules
//! that keep tree structure, sibling order, and event-to-node assignment
//! consistent under arbitrary insert/move/reparent/delete operations —
//! plus the deterministic left/right side rule and the JSON interchange
//! codec. Rendering and form chrome live elsewhere; they talk to this
//! core through gesture descriptors ([`DragSource`], [`DropTarget`]) and
//! re-derive views ([`TimelineTree`], [`resolve_side`]) after each
//! applied mutation.
//!
//! # Design Philosophy
//!
//! - **All-or-nothing mutation**: operations validate first, then swap in
//!   a fully built replacement collection. A failed save or an invalid
//!   gesture leaves the store byte-for-byte unchanged.
//! - **Derived, not stored**: display order comes from projecting the
//!   forest; visual sides come from resolving placements. Neither is ever
//!   written back.
//! - **Silent gesture rejection**: self-drops, cycle-introducing
//!   reparents, and vanished targets are frequent, expected, and resolve
//!   to [`DropOutcome::Ignored`] — no error channel exists for them.

mod codec;
mod error;
mod position;
mod reorder;
mod store;
mod tree;

pub use codec::{parse_document, to_json, Document, Theme};
pub use error::{CodecError, ModelError};
pub use position::resolve_side;
pub use reorder::{DragSource, DropOutcome, DropTarget, Edge};
pub use store::{EventDraft, Meridiem, NodeDraft, Store, TimeValueInput};
pub use tree::{OutlineRow, TimelineTree};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nenpyo_types::{EventKind, NodeSize, Placement, Side, TimeKind};

    fn draft(value: &str, parent_id: Option<nenpyo_types::NodeId>) -> NodeDraft {
        NodeDraft {
            kind: TimeKind::Custom,
            value: TimeValueInput::Text(value.to_string()),
            size: NodeSize::Small,
            parent_id,
        }
    }

    fn beat(node_id: nenpyo_types::NodeId, title: &str) -> EventDraft {
        EventDraft {
            node_id: Some(node_id),
            kind: EventKind::Main,
            character: "GM".to_string(),
            title: title.to_string(),
            content: String::new(),
            placement: Placement::Auto,
        }
    }

    #[test]
    fn test_session_planning_flow() {
        let mut store = Store::new();
        store.set_title("The Siege of Kanazawa");
        store.add_character("Akiko", "#EF4444").unwrap();

        let day1 = store.add_node(draft("Day 1", None)).unwrap();
        let day2 = store.add_node(draft("Day 2", None)).unwrap();
        let evening = store.add_node(draft("Evening", Some(day1))).unwrap();

        let arrival = store.add_event(beat(day1, "The letter arrives")).unwrap();
        let council = store.add_event(beat(day1, "War council")).unwrap();
        let skirmish = store.add_event(beat(evening, "Skirmish at the gate")).unwrap();

        // The projection drives both display and the indented dropdown.
        let rows: Vec<(String, usize)> = store
            .tree()
            .project()
            .iter()
            .map(|row| (row.node.value.clone(), row.depth))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Day 1".to_string(), 0),
                ("Evening".to_string(), 1),
                ("Day 2".to_string(), 0),
            ]
        );

        // Main/auto events alternate right then left.
        let sides: Vec<Side> = store
            .events_of(day1, false)
            .into_iter()
            .map(|e| store.side_of(e))
            .collect();
        assert_eq!(sides, vec![Side::Right, Side::Left]);

        // Rearrange: the skirmish moves up to Day 1 and lands last.
        let outcome = store.apply_drop(DragSource::Event(skirmish), DropTarget::EventSurface(day1));
        assert_eq!(outcome, DropOutcome::Applied);
        let day1_titles: Vec<&str> = store
            .events_of(day1, false)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(day1_titles, vec!["The letter arrives", "War council", "Skirmish at the gate"]);

        // Deleting Day 1 takes Evening and every event with it.
        store.delete_node(day1).unwrap();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.event_count(), 0);
        assert!(store.node(day2).is_some());
        let _ = (arrival, council);
    }

    #[test]
    fn test_rejected_gesture_then_export_import() {
        let mut store = Store::new();
        let a = store.add_node(draft("A", None)).unwrap();
        let b = store.add_node(draft("B", Some(a))).unwrap();
        let c = store.add_node(draft("C", Some(b))).unwrap();
        let beat_id = store.add_event(beat(c, "Deep beat")).unwrap();
        store.toggle_expanded(beat_id).unwrap();

        // Cycle-introducing reparent is silently ignored.
        let version = store.version();
        assert_eq!(
            store.apply_drop(DragSource::Node(a), DropTarget::NodeMarker(c)),
            DropOutcome::Ignored
        );
        assert_eq!(store.version(), version);

        // Round trip: equal up to the forced-collapsed flag.
        let mut reloaded = Store::new();
        reloaded.import_json(&store.export_json().unwrap()).unwrap();
        assert_eq!(reloaded.node_count(), 3);
        assert!(!reloaded.event(beat_id).unwrap().expanded);
        assert_eq!(reloaded.node(c).unwrap().parent_id, Some(b));
    }
}

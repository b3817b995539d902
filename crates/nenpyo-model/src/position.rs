//! Deterministic visual side assignment.
//!
//! A pure view over the event list, recomputed on every render and never
//! stored: inserting or removing an auto-positioned sibling reflows the
//! alternation of everyone else.

use nenpyo_types::{Event, EventKind, NodeId, Placement, Side};

use crate::store::Store;

/// Resolve the visual side for `event` under `node_id`.
///
/// Explicit placements pass through verbatim. With `Placement::Auto`, only
/// `main` events alternate — `sub` events resolve center. A main/auto event
/// takes its zero-based index among the node's main/auto events in
/// `events`'s natural (insertion) order: even → right, odd → left.
/// Attachment status does not affect the filter.
pub fn resolve_side(event: &Event, node_id: NodeId, events: &[Event]) -> Side {
    match event.placement {
        Placement::Left => return Side::Left,
        Placement::Right => return Side::Right,
        Placement::Center => return Side::Center,
        Placement::Auto => {}
    }
    if event.kind != EventKind::Main {
        return Side::Center;
    }

    let index = events
        .iter()
        .filter(|e| {
            e.node_id == node_id && e.kind == EventKind::Main && e.placement == Placement::Auto
        })
        .position(|e| e.id == event.id);

    match index {
        Some(i) if i % 2 == 1 => Side::Left,
        _ => Side::Right,
    }
}

impl Store {
    /// Resolve an event's side against this store's event list.
    pub fn side_of(&self, event: &Event) -> Side {
        resolve_side(event, event.node_id, &self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nenpyo_types::EventId;

    fn event(node_id: NodeId, kind: EventKind, placement: Placement) -> Event {
        Event {
            id: EventId::new(),
            node_id,
            kind,
            character: String::new(),
            title: "beat".to_string(),
            content: String::new(),
            placement,
            expanded: false,
            attached: false,
            order: 0,
        }
    }

    #[test]
    fn test_explicit_placement_passes_through() {
        let node = NodeId::new();
        let left = event(node, EventKind::Main, Placement::Left);
        let center = event(node, EventKind::Sub, Placement::Center);
        let events = vec![left.clone(), center.clone()];

        assert_eq!(resolve_side(&left, node, &events), Side::Left);
        assert_eq!(resolve_side(&center, node, &events), Side::Center);
    }

    #[test]
    fn test_sub_auto_resolves_center() {
        let node = NodeId::new();
        let sub = event(node, EventKind::Sub, Placement::Auto);
        let events = vec![sub.clone()];
        assert_eq!(resolve_side(&sub, node, &events), Side::Center);
    }

    #[test]
    fn test_auto_alternation() {
        let node = NodeId::new();
        let events: Vec<Event> = (0..4)
            .map(|_| event(node, EventKind::Main, Placement::Auto))
            .collect();

        let sides: Vec<Side> = events.iter().map(|e| resolve_side(e, node, &events)).collect();
        assert_eq!(sides, vec![Side::Right, Side::Left, Side::Right, Side::Left]);
    }

    #[test]
    fn test_alternation_reflows_on_removal() {
        let node = NodeId::new();
        let events: Vec<Event> = (0..4)
            .map(|_| event(node, EventKind::Main, Placement::Auto))
            .collect();

        // Remove E2; E1, E3, E4 reflow to right, right, left.
        let remaining: Vec<Event> = events
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, e)| e.clone())
            .collect();

        let sides: Vec<Side> = remaining
            .iter()
            .map(|e| resolve_side(e, node, &remaining))
            .collect();
        assert_eq!(sides, vec![Side::Right, Side::Right, Side::Left]);
    }

    #[test]
    fn test_alternation_skips_explicit_and_other_nodes() {
        let node = NodeId::new();
        let other = NodeId::new();
        let pinned = event(node, EventKind::Main, Placement::Left);
        let elsewhere = event(other, EventKind::Main, Placement::Auto);
        let a = event(node, EventKind::Main, Placement::Auto);
        let b = event(node, EventKind::Main, Placement::Auto);
        let events = vec![pinned, elsewhere, a.clone(), b.clone()];

        // Pinned and foreign events don't occupy alternation slots.
        assert_eq!(resolve_side(&a, node, &events), Side::Right);
        assert_eq!(resolve_side(&b, node, &events), Side::Left);
    }
}

//! Reordering engine — drag gestures over events and time nodes.
//!
//! A gesture is an explicit `(DragSource, DropTarget)` pair: the source is
//! created at drag start and consumed by value on drop, so cancelling a
//! drag is just dropping the value — no process-wide drag state.
//!
//! Each drop resolves to one of four atomic outcomes:
//!
//! - event onto a node's event-list surface → append to that node's list
//! - event onto a gap beside a sibling event → slot move within the partition
//! - event onto a node marker → attach beside the marker
//! - node onto a marker or a sibling gap → reparent / reorder in the forest
//!
//! Invalid gestures (self-drop, cycle-introducing reparent, vanished
//! source or target, mismatched source/target kinds) are expected and
//! frequent; they return [`DropOutcome::Ignored`] and leave the store
//! byte-for-byte unchanged. No error surfaces to the caller.

use nenpyo_types::{EventId, NodeId};

use crate::store::Store;

/// What is being dragged. Created at gesture start, consumed on drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragSource {
    Event(EventId),
    Node(NodeId),
}

/// Which side of a gap-drop's named sibling the item lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Before,
    After,
}

/// Where the drop landed, resolved by the UI collaborator from the drop
/// coordinate.
///
/// The two target families matter: *marker* drops (attach / make-child)
/// versus *gap* drops (insert between siblings, with an explicit edge).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// A node's general event-list drop surface.
    EventSurface(NodeId),
    /// The gap immediately before/after a specific event.
    EventGap { sibling: EventId, edge: Edge },
    /// Directly on a node's label/marker.
    NodeMarker(NodeId),
    /// The gap immediately before/after a specific node.
    NodeGap { sibling: NodeId, edge: Edge },
}

/// Whether a drop mutated the store.
///
/// `Ignored` is not an error — it tells the caller there is nothing to
/// redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum DropOutcome {
    /// The store changed; re-derive views and redraw.
    Applied,
    /// No-op; the store is unchanged.
    Ignored,
}

impl Edge {
    /// Target order relative to a sibling's order.
    fn target_order(self, sibling_order: i64) -> i64 {
        match self {
            Edge::Before => sibling_order,
            Edge::After => sibling_order + 1,
        }
    }
}

impl Store {
    /// Apply a completed drag gesture.
    pub fn apply_drop(&mut self, source: DragSource, target: DropTarget) -> DropOutcome {
        let outcome = match (source, target) {
            (DragSource::Event(id), DropTarget::EventSurface(node_id)) => {
                self.drop_event_on_surface(id, node_id)
            }
            (DragSource::Event(id), DropTarget::EventGap { sibling, edge }) => {
                self.drop_event_in_gap(id, sibling, edge)
            }
            (DragSource::Event(id), DropTarget::NodeMarker(node_id)) => {
                self.attach_event(id, node_id)
            }
            (DragSource::Node(id), DropTarget::NodeMarker(target_id)) => {
                self.reparent_node(id, target_id)
            }
            (DragSource::Node(id), DropTarget::NodeGap { sibling, edge }) => {
                self.drop_node_in_gap(id, sibling, edge)
            }
            // An event can't land in the forest's gaps, nor a node in an
            // event list.
            _ => DropOutcome::Ignored,
        };
        if outcome == DropOutcome::Applied {
            self.version += 1;
        }
        outcome
    }

    // =========================================================================
    // Event drops
    // =========================================================================

    /// Drop on a node's event-list surface: append to the end of that
    /// node's list, leaving the attached partition.
    fn drop_event_on_surface(&mut self, id: EventId, node_id: NodeId) -> DropOutcome {
        if self.event(id).is_none() || self.node(node_id).is_none() {
            return DropOutcome::Ignored;
        }
        self.append_event_to(id, node_id);
        DropOutcome::Applied
    }

    /// Drop on the gap beside a sibling event.
    ///
    /// Within the sibling's own `(node, attached)` partition this is a
    /// slot move: pull the event out and renumber the span between old and
    /// new position. From another node — or from the attached partition —
    /// it degrades to an append; fine-grained placement then takes a
    /// second gap drop.
    fn drop_event_in_gap(&mut self, id: EventId, sibling: EventId, edge: Edge) -> DropOutcome {
        if id == sibling {
            return DropOutcome::Ignored;
        }
        let Some(dragged) = self.event(id).cloned() else {
            return DropOutcome::Ignored;
        };
        let Some(sib) = self.event(sibling).cloned() else {
            return DropOutcome::Ignored;
        };

        if dragged.node_id != sib.node_id || dragged.attached != sib.attached {
            self.append_event_to(id, sib.node_id);
            return DropOutcome::Applied;
        }

        let target_order = edge.target_order(sib.order);
        if dragged.order == target_order {
            return DropOutcome::Ignored; // already in place
        }

        let current = dragged.order;
        self.events = self
            .events
            .iter()
            .map(|event| {
                if event.node_id != dragged.node_id || event.attached != dragged.attached {
                    return event.clone();
                }
                let mut event = event.clone();
                if event.id == id {
                    event.order = target_order;
                } else if current < target_order {
                    // Moving forward: the span (current, target] shifts down.
                    if event.order > current && event.order <= target_order {
                        event.order -= 1;
                    }
                } else {
                    // Moving backward: the span [target, current) shifts up.
                    if event.order >= target_order && event.order < current {
                        event.order += 1;
                    }
                }
                event
            })
            .collect();
        DropOutcome::Applied
    }

    /// Drop directly on a node marker: attach the event beside the marker.
    ///
    /// The dragged event takes slot 0 of the attached partition; existing
    /// attached events shift up one to keep per-partition orders unique.
    fn attach_event(&mut self, id: EventId, node_id: NodeId) -> DropOutcome {
        if self.event(id).is_none() || self.node(node_id).is_none() {
            return DropOutcome::Ignored;
        }
        self.events = self
            .events
            .iter()
            .map(|event| {
                let mut event = event.clone();
                if event.id == id {
                    event.node_id = node_id;
                    event.attached = true;
                    event.order = 0;
                } else if event.node_id == node_id && event.attached {
                    event.order += 1;
                }
                event
            })
            .collect();
        DropOutcome::Applied
    }

    /// Reassign an event to `node_id`'s regular list, at the end.
    fn append_event_to(&mut self, id: EventId, node_id: NodeId) {
        let order = self.append_order(node_id);
        self.events = self
            .events
            .iter()
            .map(|event| {
                let mut event = event.clone();
                if event.id == id {
                    event.node_id = node_id;
                    event.attached = false;
                    event.order = order;
                }
                event
            })
            .collect();
    }

    // =========================================================================
    // Node drops
    // =========================================================================

    /// Drop a node directly onto another node: become its last child.
    ///
    /// Rejected when the target *is* the dragged node or lives inside its
    /// subtree — the forest must stay acyclic.
    fn reparent_node(&mut self, id: NodeId, target_id: NodeId) -> DropOutcome {
        if id == target_id {
            return DropOutcome::Ignored;
        }
        if self.node(id).is_none() || self.node(target_id).is_none() {
            return DropOutcome::Ignored;
        }
        if self.tree().is_descendant(target_id, id) {
            tracing::debug!(dragged = %id, target = %target_id, "reparent would create a cycle, ignoring");
            return DropOutcome::Ignored;
        }

        let order = self.next_child_order(Some(target_id));
        self.nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                if node.id == id {
                    node.parent_id = Some(target_id);
                    node.order = order;
                }
                node
            })
            .collect();
        DropOutcome::Applied
    }

    /// Drop a node on the gap beside a sibling node.
    ///
    /// The dragged node adopts the sibling's parent — a gap drop can
    /// simultaneously reparent and position (e.g. pulling a node out of a
    /// sub-branch back to the root-level gap list). Within the same parent
    /// group it is the usual slot renumbering; from another group the
    /// group shifts open at the target slot.
    fn drop_node_in_gap(&mut self, id: NodeId, sibling: NodeId, edge: Edge) -> DropOutcome {
        if id == sibling {
            return DropOutcome::Ignored;
        }
        let Some(dragged) = self.node(id).cloned() else {
            return DropOutcome::Ignored;
        };
        let Some(sib) = self.node(sibling).cloned() else {
            return DropOutcome::Ignored;
        };

        // Adopting the sibling's parent must not fold the dragged node's
        // subtree onto itself.
        if let Some(parent_id) = sib.parent_id {
            if parent_id == id || self.tree().is_descendant(parent_id, id) {
                tracing::debug!(dragged = %id, sibling = %sibling, "gap drop would create a cycle, ignoring");
                return DropOutcome::Ignored;
            }
        }

        let target_order = edge.target_order(sib.order);
        let same_group = dragged.parent_id == sib.parent_id;
        if same_group && dragged.order == target_order {
            return DropOutcome::Ignored; // already in place
        }

        let current = dragged.order;
        self.nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                if node.id == id {
                    node.parent_id = sib.parent_id;
                    node.order = target_order;
                    return node;
                }
                if node.parent_id != sib.parent_id {
                    return node;
                }
                if !same_group {
                    // Insert from another group: open the slot.
                    if node.order >= target_order {
                        node.order += 1;
                    }
                } else if current < target_order {
                    if node.order > current && node.order <= target_order {
                        node.order -= 1;
                    }
                } else if node.order >= target_order && node.order < current {
                    node.order += 1;
                }
                node
            })
            .collect();
        DropOutcome::Applied
    }
}

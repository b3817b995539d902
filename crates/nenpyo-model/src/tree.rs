//! Computed tree index over the time-node forest.
//!
//! `TimelineTree` is an ephemeral structure built from the store's flat
//! node list. It is the single source of truth for display order: roots
//! sorted by order, then a pre-order walk into children sorted by order.
//! The same projection feeds the indented time-node dropdown.
//!
//! All traversals are iterative (explicit stack, no recursion) and bounded
//! by the live node count, so corrupted imported data with parent cycles
//! can never hang or overflow — they warn and stop instead.

use std::collections::{HashMap, HashSet};

use nenpyo_types::{NodeId, TimeNode};

/// One row of the order-sorted, depth-annotated projection.
#[derive(Clone, Copy, Debug)]
pub struct OutlineRow<'a> {
    pub node: &'a TimeNode,
    /// 0 for roots.
    pub depth: usize,
}

/// Ephemeral index over the time-node forest.
#[derive(Debug, Clone)]
pub struct TimelineTree {
    /// Root nodes (no parent), sorted by order.
    roots: Vec<NodeId>,
    /// Children indexed by parent id, each list sorted by order.
    children: HashMap<NodeId, Vec<NodeId>>,
    /// All nodes indexed by id.
    nodes: HashMap<NodeId, TimeNode>,
}

impl TimelineTree {
    /// Build the index from a flat node list.
    pub fn from_nodes(list: &[TimeNode]) -> Self {
        let mut roots = Vec::new();
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut nodes = HashMap::new();

        for node in list {
            if let Some(parent_id) = node.parent_id {
                children.entry(parent_id).or_default().push(node.id);
            } else {
                roots.push(node.id);
            }
            nodes.insert(node.id, node.clone());
        }

        let order_of = |id: &NodeId| nodes.get(id).map(|n| n.order).unwrap_or(0);
        roots.sort_by_key(order_of);
        for siblings in children.values_mut() {
            siblings.sort_by_key(order_of);
        }

        Self {
            roots,
            children,
            nodes,
        }
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&TimeNode> {
        self.nodes.get(&id)
    }

    /// Check if the forest is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Pre-order projection: roots by order, then children by order,
    /// depth-annotated.
    pub fn project(&self) -> Vec<OutlineRow<'_>> {
        let bound = self.nodes.len();
        let mut rows = Vec::with_capacity(bound);
        // Push roots in reverse to process the first root first.
        let mut stack: Vec<(usize, NodeId)> = self.roots.iter().rev().map(|id| (0, *id)).collect();
        let mut visited = HashSet::new();

        while let Some((depth, id)) = stack.pop() {
            if !visited.insert(id) {
                continue; // cycle — skip
            }
            if visited.len() > bound {
                tracing::warn!("projection exceeded node count ({bound}), stopping");
                break;
            }
            if let Some(node) = self.nodes.get(&id) {
                rows.push(OutlineRow { node, depth });
                if let Some(siblings) = self.children.get(&id) {
                    for child in siblings.iter().rev() {
                        stack.push((depth + 1, *child));
                    }
                }
            }
        }

        rows
    }

    /// Walk `parent_id` links upward from `id`; true iff `ancestor` is
    /// found before reaching a root.
    ///
    /// Asked about itself, a node is not its own descendant. The walk is
    /// bounded by the node count and **fails closed** — on a malformed
    /// (cyclic) forest it reports true so cycle-guarded moves are rejected.
    pub fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let bound = self.nodes.len();
        let mut steps = 0;
        let mut current = self.nodes.get(&id).and_then(|n| n.parent_id);

        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            steps += 1;
            if steps > bound {
                tracing::warn!("parent walk exceeded node count ({bound}), failing closed");
                return true;
            }
            current = self.nodes.get(&parent_id).and_then(|n| n.parent_id);
        }

        false
    }

    /// Ids of the subtree rooted at `root` (inclusive). Bounded by the node
    /// count; cycles are skipped via the visited set.
    pub fn subtree_ids(&self, root: NodeId) -> HashSet<NodeId> {
        let bound = self.nodes.len();
        let mut result = HashSet::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if !result.insert(id) {
                continue; // cycle — skip
            }
            if result.len() > bound {
                tracing::warn!("subtree walk exceeded node count ({bound}), truncating");
                break;
            }
            if let Some(siblings) = self.children.get(&id) {
                stack.extend(siblings.iter().copied());
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nenpyo_types::{NodeSize, TimeKind};

    fn node(id: NodeId, parent_id: Option<NodeId>, order: i64, value: &str) -> TimeNode {
        TimeNode {
            id,
            kind: TimeKind::Custom,
            value: value.to_string(),
            size: NodeSize::Small,
            parent_id,
            order,
        }
    }

    /// Two roots, second root listed first but ordered after; one child each
    /// side plus a grandchild.
    fn sample_forest() -> (Vec<TimeNode>, [NodeId; 5]) {
        let ids = [NodeId::new(), NodeId::new(), NodeId::new(), NodeId::new(), NodeId::new()];
        let [r0, r1, c0, c1, g0] = ids;
        let nodes = vec![
            node(r1, None, 1, "Day 2"),
            node(r0, None, 0, "Day 1"),
            node(c1, Some(r0), 1, "Evening"),
            node(c0, Some(r0), 0, "Morning"),
            node(g0, Some(c0), 0, "Dawn patrol"),
        ];
        (nodes, ids)
    }

    #[test]
    fn test_projection_is_preorder_and_order_sorted() {
        let (nodes, [r0, r1, c0, c1, g0]) = sample_forest();
        let tree = TimelineTree::from_nodes(&nodes);
        let rows = tree.project();

        let got: Vec<(NodeId, usize)> = rows.iter().map(|r| (r.node.id, r.depth)).collect();
        assert_eq!(
            got,
            vec![(r0, 0), (c0, 1), (g0, 2), (c1, 1), (r1, 0)]
        );
    }

    #[test]
    fn test_is_descendant() {
        let (nodes, [r0, r1, c0, _c1, g0]) = sample_forest();
        let tree = TimelineTree::from_nodes(&nodes);

        assert!(tree.is_descendant(g0, r0));
        assert!(tree.is_descendant(g0, c0));
        assert!(tree.is_descendant(c0, r0));
        assert!(!tree.is_descendant(r0, g0));
        assert!(!tree.is_descendant(r1, r0));
        // A node is not its own descendant.
        assert!(!tree.is_descendant(r0, r0));
    }

    #[test]
    fn test_subtree_ids_inclusive() {
        let (nodes, [r0, _r1, c0, c1, g0]) = sample_forest();
        let tree = TimelineTree::from_nodes(&nodes);

        let subtree = tree.subtree_ids(r0);
        assert_eq!(subtree.len(), 4);
        for id in [r0, c0, c1, g0] {
            assert!(subtree.contains(&id));
        }
    }

    #[test]
    fn test_cyclic_forest_terminates_and_fails_closed() {
        // A ↔ B parent cycle, as corrupted imported data could contain.
        let a = NodeId::new();
        let b = NodeId::new();
        let nodes = vec![node(a, Some(b), 0, "A"), node(b, Some(a), 0, "B")];
        let tree = TimelineTree::from_nodes(&nodes);

        // Bounded walks terminate; the descendant check fails closed.
        assert!(tree.is_descendant(a, b));
        assert!(tree.is_descendant(b, a));
        assert!(tree.subtree_ids(a).len() <= 2);
        assert!(tree.project().len() <= 2);
    }

    #[test]
    fn test_empty_forest() {
        let tree = TimelineTree::from_nodes(&[]);
        assert!(tree.is_empty());
        assert!(tree.project().is_empty());
        assert!(!tree.is_descendant(NodeId::new(), NodeId::new()));
    }
}

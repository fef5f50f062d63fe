//! Node store: the authoritative node list and the node selection.
//!
//! The store knows nothing about edges. Operations that remove nodes return
//! the removed ids so the [`GraphEditor`](crate::editor::GraphEditor) can
//! cascade the removal into the edge store in the same call.

use fc_core::change::NodeChange;
use fc_core::id::NodeId;
use fc_core::model::{Node, NodeData, NodePatch, Position};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Ids removed by a store operation, in removal order.
pub type RemovedNodes = SmallVec<[NodeId; 4]>;

/// Summary of an applied node change-set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeChangeOutcome {
    /// Changes that found their node and took effect.
    pub applied: usize,
    /// Changes naming an id that is not in the store.
    pub skipped: usize,
    /// Nodes removed by `Remove` changes; their edges still need cleanup.
    pub removed: RemovedNodes,
}

#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: Vec<Node>,
    selected: Vec<NodeId>,
    duplicate_offset: Position,
}

impl NodeStore {
    pub fn new(duplicate_offset: Position) -> Self {
        Self {
            nodes: Vec::new(),
            selected: Vec::new(),
            duplicate_offset,
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All nodes in paint (insertion) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn selected_node_ids(&self) -> &[NodeId] {
        &self.selected
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Replace the whole collection. No validation; selection is left as is.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        log::debug!("set_nodes: {} nodes", nodes.len());
        self.nodes = nodes;
    }

    /// Create a node from a partial payload, filling defaults. The new node
    /// is appended and becomes the only selected node.
    pub fn add_node(&mut self, payload: &NodePatch, position: Position) -> NodeId {
        let data = NodeData::from_patch(payload);
        let id = self.unused_id();
        self.nodes.push(Node::new(id, position, data));
        self.selected = vec![id];
        log::debug!("add_node {id} ({:?}) at ({}, {})", payload.kind(), position.x, position.y);
        id
    }

    /// Merge `patch` into a node's payload. Returns `false` if the node is
    /// missing or the patch is for the other node kind.
    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> bool {
        let Some(node) = self.get_mut(id) else {
            log::debug!("update_node: {id} not found, ignoring");
            return false;
        };
        if !node.data.apply_patch(patch) {
            log::warn!(
                "update_node: {:?} patch does not fit {:?} node {id}",
                patch.kind(),
                node.kind()
            );
            return false;
        }
        true
    }

    /// Clone a node's payload into a new node shifted by `offset` (or the
    /// configured duplicate offset). The clone becomes the only selection.
    pub fn duplicate_node(&mut self, id: NodeId, offset: Option<Position>) -> Option<NodeId> {
        let Some(source) = self.get(id) else {
            log::debug!("duplicate_node: {id} not found, ignoring");
            return None;
        };
        let position = source
            .position
            .offset_by(offset.unwrap_or(self.duplicate_offset));
        let data = source.data.clone();

        let new_id = self.unused_id();
        self.nodes.push(Node::new(new_id, position, data));
        self.selected = vec![new_id];
        log::debug!("duplicate_node {id} -> {new_id}");
        Some(new_id)
    }

    /// Remove every node whose id is in `ids` and drop them from the
    /// selection. Returns the ids that were actually present.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> RemovedNodes {
        let doomed: HashSet<NodeId> = ids.iter().copied().collect();
        let mut removed = RemovedNodes::new();
        self.nodes.retain(|n| {
            if doomed.contains(&n.id) {
                removed.push(n.id);
                false
            } else {
                true
            }
        });
        self.selected.retain(|id| !doomed.contains(id));
        if !removed.is_empty() {
            log::debug!("delete_nodes: removed {}", removed.len());
        }
        removed
    }

    /// Replace the selection verbatim. Ids are not checked against the
    /// collection; callers keep the selection meaningful.
    pub fn set_selected_node_ids(&mut self, ids: Vec<NodeId>) {
        self.selected = ids;
    }

    /// Apply a canvas change-set in order.
    ///
    /// Selection is updated directly by each `Select`/`Remove` change.
    /// Changes naming a missing node are skipped.
    pub fn apply_changes(&mut self, changes: &[NodeChange]) -> NodeChangeOutcome {
        let mut outcome = NodeChangeOutcome::default();
        for change in changes {
            let hit = match change {
                NodeChange::Position { id, position, .. } => match self.get_mut(*id) {
                    Some(node) => {
                        if let Some(p) = position {
                            node.position = *p;
                        }
                        true
                    }
                    None => false,
                },
                NodeChange::Dimensions { id, width, height } => match self.get_mut(*id) {
                    Some(node) => {
                        node.data.set_dimensions(*width, *height);
                        true
                    }
                    None => false,
                },
                NodeChange::Select { id, selected } => {
                    if self.contains(*id) {
                        self.select(*id, *selected);
                        true
                    } else {
                        false
                    }
                }
                NodeChange::Remove { id } => {
                    let removed = self.delete_nodes(&[*id]);
                    let hit = !removed.is_empty();
                    outcome.removed.extend(removed);
                    hit
                }
            };
            if hit {
                outcome.applied += 1;
            } else {
                log::trace!("node change skipped, no node {}", change.id());
                outcome.skipped += 1;
            }
        }
        outcome
    }

    fn select(&mut self, id: NodeId, selected: bool) {
        if selected {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        } else {
            self.selected.retain(|s| *s != id);
        }
    }

    /// A fresh id not already used by a node in the store.
    fn unused_id(&self) -> NodeId {
        loop {
            let id = NodeId::fresh();
            if !self.contains(id) {
                return id;
            }
        }
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new(Position::new(50.0, 50.0))
    }
}

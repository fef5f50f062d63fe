//! Edge store: the authoritative edge list and the edge selection.
//!
//! The store does not check endpoints against the node list. Self-loops and
//! several edges between the same pair of nodes are accepted.

use fc_core::change::EdgeChange;
use fc_core::id::{EdgeId, NodeId};
use fc_core::model::{Connection, Edge, EdgeData, EdgePatch};
use smallvec::SmallVec;
use std::collections::HashSet;

/// Ids removed by a store operation, in removal order.
pub type RemovedEdges = SmallVec<[EdgeId; 4]>;

/// Summary of an applied edge change-set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeChangeOutcome {
    pub applied: usize,
    pub skipped: usize,
    pub removed: RemovedEdges,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: Vec<Edge>,
    selected: Vec<EdgeId>,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn selected_edge_ids(&self) -> &[EdgeId] {
        &self.selected
    }

    /// Edges starting or ending at `node`, in list order.
    pub fn edges_touching(&self, node: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Replace the whole collection. Endpoints are not checked.
    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        log::debug!("set_edges: {} edges", edges.len());
        self.edges = edges;
    }

    /// Create an edge for `connection`, filling unset style fields with
    /// defaults. The new edge becomes the only selected edge.
    pub fn add_edge(&mut self, connection: Connection, patch: &EdgePatch) -> EdgeId {
        let id = self.unused_id();
        log::debug!("add_edge {id}: {} -> {}", connection.source, connection.target);
        self.edges.push(Edge::new(id, connection, EdgeData::from_patch(patch)));
        self.selected = vec![id];
        id
    }

    /// Handler for a completed drag-to-connect gesture: exactly one new
    /// edge with default styling, selected like any other new edge.
    pub fn connect(&mut self, connection: Connection) -> EdgeId {
        self.add_edge(connection, &EdgePatch::default())
    }

    /// Merge `patch` into an edge's payload. Returns `false` if the edge is missing.
    pub fn update_edge(&mut self, id: EdgeId, patch: &EdgePatch) -> bool {
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(edge) => {
                edge.data.apply(patch);
                true
            }
            None => {
                log::debug!("update_edge: {id} not found, ignoring");
                false
            }
        }
    }

    /// Remove every edge whose id is in `ids` and drop them from the selection.
    pub fn delete_edges(&mut self, ids: &[EdgeId]) -> RemovedEdges {
        let doomed: HashSet<EdgeId> = ids.iter().copied().collect();
        self.remove_where(|e| doomed.contains(&e.id))
    }

    /// Remove every edge that starts or ends at one of `nodes`.
    pub fn delete_edges_for_nodes(&mut self, nodes: &[NodeId]) -> RemovedEdges {
        if nodes.is_empty() {
            return RemovedEdges::new();
        }
        let gone: HashSet<NodeId> = nodes.iter().copied().collect();
        let removed = self.remove_where(|e| gone.contains(&e.source) || gone.contains(&e.target));
        if !removed.is_empty() {
            log::debug!(
                "cascade: {} edge(s) removed with {} node(s)",
                removed.len(),
                nodes.len()
            );
        }
        removed
    }

    /// Replace the selection verbatim, without checking ids.
    pub fn set_selected_edge_ids(&mut self, ids: Vec<EdgeId>) {
        self.selected = ids;
    }

    /// Apply a canvas change-set in order, updating the selection directly.
    pub fn apply_changes(&mut self, changes: &[EdgeChange]) -> EdgeChangeOutcome {
        let mut outcome = EdgeChangeOutcome::default();
        for change in changes {
            let hit = match change {
                EdgeChange::Select { id, selected } => {
                    if self.contains(*id) {
                        if *selected {
                            if !self.selected.contains(id) {
                                self.selected.push(*id);
                            }
                        } else {
                            self.selected.retain(|s| s != id);
                        }
                        true
                    } else {
                        false
                    }
                }
                EdgeChange::Remove { id } => {
                    let removed = self.delete_edges(&[*id]);
                    let hit = !removed.is_empty();
                    outcome.removed.extend(removed);
                    hit
                }
            };
            if hit {
                outcome.applied += 1;
            } else {
                log::trace!("edge change skipped, no edge {}", change.id());
                outcome.skipped += 1;
            }
        }
        outcome
    }

    fn remove_where(&mut self, mut doomed: impl FnMut(&Edge) -> bool) -> RemovedEdges {
        let mut removed = RemovedEdges::new();
        self.edges.retain(|e| {
            if doomed(e) {
                removed.push(e.id);
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            self.selected.retain(|id| !removed.contains(id));
        }
        removed
    }

    fn unused_id(&self) -> EdgeId {
        loop {
            let id = EdgeId::fresh();
            if !self.contains(id) {
                return id;
            }
        }
    }
}

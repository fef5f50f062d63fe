//! Graph coordinator: owns the node, edge, and canvas stores and keeps them
//! consistent.
//!
//! The one cross-store rule lives here: removing a node removes every edge
//! that starts or ends at it. Both removals happen inside the same
//! `&mut self` call, so a reader never sees one without the other.
//!
//! The stores are only reachable read-only from outside, so every deletion
//! goes through the cascade. Endpoints are checked only when an edge is
//! created. Edges restored from a
//! snapshot are taken as they are, even when they point at nothing.

use crate::canvas::CanvasStore;
use crate::config::EditorConfig;
use crate::edges::{EdgeChangeOutcome, EdgeStore, RemovedEdges};
use crate::nodes::{NodeChangeOutcome, NodeStore, RemovedNodes};
use fc_core::change::{EdgeChange, NodeChange};
use fc_core::id::{EdgeId, NodeId};
use fc_core::lint::{LintDiagnostic, LintInput, lint_graph};
use fc_core::model::{Connection, Edge, EdgePatch, Node, NodePatch, Position};
use serde::{Deserialize, Serialize};

/// What a deletion actually removed, cascade included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Removal {
    pub nodes: RemovedNodes,
    pub edges: RemovedEdges,
}

impl Removal {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// A gesture from the canvas, dispatched through [`GraphEditor::apply_mutation`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphMutation {
    AddNode {
        payload: NodePatch,
        position: Position,
    },
    UpdateNode {
        id: NodeId,
        patch: NodePatch,
    },
    /// Clone a node. `offset` defaults to the configured duplicate offset.
    DuplicateNode {
        id: NodeId,
        #[serde(default)]
        offset: Option<Position>,
    },
    DeleteNodes {
        ids: Vec<NodeId>,
    },
    Connect {
        connection: Connection,
    },
    AddEdge {
        connection: Connection,
        #[serde(default)]
        patch: EdgePatch,
    },
    UpdateEdge {
        id: EdgeId,
        patch: EdgePatch,
    },
    DeleteEdges {
        ids: Vec<EdgeId>,
    },
    NodeChanges {
        changes: Vec<NodeChange>,
    },
    EdgeChanges {
        changes: Vec<EdgeChange>,
    },
}

/// Result of a dispatched mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MutationOutcome {
    NodeAdded { id: NodeId },
    EdgeAdded { id: EdgeId },
    Updated,
    Removed(Removal),
    /// The mutation named something that does not exist; nothing changed.
    Ignored,
}

/// The editor's in-memory diagram: one instance per open canvas, passed by
/// reference to whoever needs it.
#[derive(Debug, Clone)]
pub struct GraphEditor {
    nodes: NodeStore,
    edges: EdgeStore,
    canvas: CanvasStore,
}

impl GraphEditor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            nodes: NodeStore::new(config.duplicate_offset),
            edges: EdgeStore::new(),
            canvas: CanvasStore::new(config.default_canvas.clone()),
        }
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    pub fn canvas(&self) -> &CanvasStore {
        &self.canvas
    }

    /// Canvas settings and view flags have no cross-store rules.
    pub fn canvas_mut(&mut self) -> &mut CanvasStore {
        &mut self.canvas
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Replace every node (project load). Edges are left as they are.
    pub fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes.set_nodes(nodes);
    }

    pub fn add_node(&mut self, payload: &NodePatch, position: Position) -> NodeId {
        self.nodes.add_node(payload, position)
    }

    pub fn update_node(&mut self, id: NodeId, patch: &NodePatch) -> bool {
        self.nodes.update_node(id, patch)
    }

    pub fn duplicate_node(&mut self, id: NodeId, offset: Option<Position>) -> Option<NodeId> {
        self.nodes.duplicate_node(id, offset)
    }

    /// Delete nodes and, in the same step, every edge touching any of
    /// `ids`. Edges pointing at an id that is not a node (loaded orphans)
    /// are swept too.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Removal {
        let nodes = self.nodes.delete_nodes(ids);
        let edges = self.edges.delete_edges_for_nodes(ids);
        Removal { nodes, edges }
    }

    pub fn set_selected_node_ids(&mut self, ids: Vec<NodeId>) {
        self.nodes.set_selected_node_ids(ids);
    }

    /// Apply a node change-set; every `Remove` change cascades to edges,
    /// whether or not the node itself was present.
    pub fn apply_node_changes(
        &mut self,
        changes: &[NodeChange],
    ) -> (NodeChangeOutcome, RemovedEdges) {
        let requested: Vec<NodeId> = changes
            .iter()
            .filter_map(|change| match change {
                NodeChange::Remove { id } => Some(*id),
                _ => None,
            })
            .collect();
        let outcome = self.nodes.apply_changes(changes);
        let cascaded = self.edges.delete_edges_for_nodes(&requested);
        (outcome, cascaded)
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Replace every edge (project load). Endpoints are not checked.
    pub fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges.set_edges(edges);
    }

    /// Complete a drag-to-connect gesture. Returns `None` (and adds nothing)
    /// when either endpoint is not a node in the store. Self-loops and
    /// repeated connections are accepted.
    pub fn connect(&mut self, connection: Connection) -> Option<EdgeId> {
        if !self.endpoints_exist(&connection) {
            return None;
        }
        Some(self.edges.connect(connection))
    }

    /// Create a styled edge. Same endpoint rule as [`connect`](Self::connect).
    pub fn add_edge(&mut self, connection: Connection, patch: &EdgePatch) -> Option<EdgeId> {
        if !self.endpoints_exist(&connection) {
            return None;
        }
        Some(self.edges.add_edge(connection, patch))
    }

    pub fn update_edge(&mut self, id: EdgeId, patch: &EdgePatch) -> bool {
        self.edges.update_edge(id, patch)
    }

    pub fn delete_edges(&mut self, ids: &[EdgeId]) -> RemovedEdges {
        self.edges.delete_edges(ids)
    }

    pub fn set_selected_edge_ids(&mut self, ids: Vec<EdgeId>) {
        self.edges.set_selected_edge_ids(ids);
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) -> EdgeChangeOutcome {
        self.edges.apply_changes(changes)
    }

    fn endpoints_exist(&self, connection: &Connection) -> bool {
        for id in [connection.source, connection.target] {
            if !self.nodes.contains(id) {
                log::warn!(
                    "connection {} -> {} rejected: no node {id}",
                    connection.source,
                    connection.target
                );
                return false;
            }
        }
        true
    }

    // ─── Whole-graph operations ──────────────────────────────────────────

    /// Delete the selected nodes (with their edges) and the selected edges.
    pub fn delete_selection(&mut self) -> Removal {
        let node_ids = self.nodes.selected_node_ids().to_vec();
        let edge_ids = self.edges.selected_edge_ids().to_vec();
        let mut removal = self.delete_nodes(&node_ids);
        removal.edges.extend(self.edges.delete_edges(&edge_ids));
        removal
    }

    /// Drop both selections.
    pub fn clear_selection(&mut self) {
        self.nodes.set_selected_node_ids(Vec::new());
        self.edges.set_selected_edge_ids(Vec::new());
    }

    /// Report tolerated inconsistencies (dangling edges, stale selection, ...).
    pub fn lint(&self) -> Vec<LintDiagnostic> {
        lint_graph(LintInput {
            nodes: self.nodes.nodes(),
            edges: self.edges.edges(),
            selected_node_ids: self.nodes.selected_node_ids(),
            selected_edge_ids: self.edges.selected_edge_ids(),
        })
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Apply one canvas gesture.
    pub fn apply_mutation(&mut self, mutation: GraphMutation) -> MutationOutcome {
        log::trace!("apply_mutation {mutation:?}");
        match mutation {
            GraphMutation::AddNode { payload, position } => MutationOutcome::NodeAdded {
                id: self.add_node(&payload, position),
            },
            GraphMutation::UpdateNode { id, patch } => updated(self.update_node(id, &patch)),
            GraphMutation::DuplicateNode { id, offset } => match self.duplicate_node(id, offset) {
                Some(id) => MutationOutcome::NodeAdded { id },
                None => MutationOutcome::Ignored,
            },
            GraphMutation::DeleteNodes { ids } => removed(self.delete_nodes(&ids)),
            GraphMutation::Connect { connection } => match self.connect(connection) {
                Some(id) => MutationOutcome::EdgeAdded { id },
                None => MutationOutcome::Ignored,
            },
            GraphMutation::AddEdge { connection, patch } => {
                match self.add_edge(connection, &patch) {
                    Some(id) => MutationOutcome::EdgeAdded { id },
                    None => MutationOutcome::Ignored,
                }
            }
            GraphMutation::UpdateEdge { id, patch } => updated(self.update_edge(id, &patch)),
            GraphMutation::DeleteEdges { ids } => removed(Removal {
                nodes: RemovedNodes::new(),
                edges: self.delete_edges(&ids),
            }),
            GraphMutation::NodeChanges { changes } => {
                let (outcome, edges) = self.apply_node_changes(&changes);
                if !outcome.removed.is_empty() || !edges.is_empty() {
                    removed(Removal {
                        nodes: outcome.removed,
                        edges,
                    })
                } else {
                    updated(outcome.applied > 0)
                }
            }
            GraphMutation::EdgeChanges { changes } => {
                let outcome = self.apply_edge_changes(&changes);
                if !outcome.removed.is_empty() {
                    removed(Removal {
                        nodes: RemovedNodes::new(),
                        edges: outcome.removed,
                    })
                } else {
                    updated(outcome.applied > 0)
                }
            }
        }
    }
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

fn updated(changed: bool) -> MutationOutcome {
    if changed {
        MutationOutcome::Updated
    } else {
        MutationOutcome::Ignored
    }
}

fn removed(removal: Removal) -> MutationOutcome {
    if removal.is_empty() {
        MutationOutcome::Ignored
    } else {
        MutationOutcome::Removed(removal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::model::StandardPatch;
    use pretty_assertions::assert_eq;

    fn standard(label: &str) -> NodePatch {
        NodePatch::Standard(StandardPatch::label(label))
    }

    #[test]
    fn connect_requires_existing_endpoints() {
        let mut editor = GraphEditor::default();
        let a = editor.add_node(&standard("a"), Position::default());
        assert_eq!(
            editor.connect(Connection::new(a, NodeId::intern("nowhere"))),
            None
        );
        assert!(editor.edges().is_empty());
        assert!(editor.connect(Connection::new(a, a)).is_some());
    }

    #[test]
    fn remove_change_cascades_to_edges() {
        let mut editor = GraphEditor::default();
        let a = editor.add_node(&standard("a"), Position::default());
        let b = editor.add_node(&standard("b"), Position::default());
        let edge = editor.connect(Connection::new(a, b)).unwrap();

        let (outcome, cascaded) = editor.apply_node_changes(&[NodeChange::Remove { id: b }]);
        assert_eq!(outcome.removed.as_slice(), &[b]);
        assert_eq!(cascaded.as_slice(), &[edge]);
        assert!(editor.edges().is_empty());
        assert!(editor.edges().selected_edge_ids().is_empty());
    }

    #[test]
    fn deleting_missing_endpoint_sweeps_orphans() {
        let mut editor = GraphEditor::default();
        let a = editor.add_node(&standard("a"), Position::default());
        let ghost = NodeId::intern("ghost");
        let from_ghost = EdgeId::intern("ghost-a");
        let to_ghost = EdgeId::intern("a-ghost");
        editor.set_edges(vec![
            Edge::new(from_ghost, Connection::new(ghost, a), Default::default()),
            Edge::new(to_ghost, Connection::new(a, ghost), Default::default()),
        ]);

        let removal = editor.delete_nodes(&[ghost]);
        assert!(removal.nodes.is_empty());
        assert_eq!(removal.edges.as_slice(), &[from_ghost, to_ghost]);
        assert!(editor.edges().is_empty());
        assert_eq!(editor.nodes().len(), 1);
    }

    #[test]
    fn missed_remove_change_still_cascades() {
        let mut editor = GraphEditor::default();
        let a = editor.add_node(&standard("a"), Position::default());
        let ghost = NodeId::intern("ghost-2");
        let orphan = EdgeId::intern("a-ghost-2");
        editor.set_edges(vec![Edge::new(
            orphan,
            Connection::new(a, ghost),
            Default::default(),
        )]);

        let outcome = editor.apply_mutation(GraphMutation::NodeChanges {
            changes: vec![NodeChange::Remove { id: ghost }],
        });
        assert_eq!(
            outcome,
            MutationOutcome::Removed(Removal {
                nodes: RemovedNodes::new(),
                edges: RemovedEdges::from_slice(&[orphan]),
            })
        );
        assert!(editor.edges().is_empty());
    }

    #[test]
    fn delete_selection_removes_nodes_edges_and_cascade() {
        let mut editor = GraphEditor::default();
        let a = editor.add_node(&standard("a"), Position::default());
        let b = editor.add_node(&standard("b"), Position::default());
        let c = editor.add_node(&standard("c"), Position::default());
        let ab = editor.connect(Connection::new(a, b)).unwrap();
        let bc = editor.connect(Connection::new(b, c)).unwrap();

        editor.set_selected_node_ids(vec![a]);
        editor.set_selected_edge_ids(vec![bc]);
        let removal = editor.delete_selection();

        assert_eq!(removal.nodes.as_slice(), &[a]);
        assert_eq!(removal.edges.as_slice(), &[ab, bc]);
        assert_eq!(editor.nodes().len(), 2);
        assert!(editor.edges().is_empty());
    }

    #[test]
    fn dispatch_reports_ignored_for_missing_ids() {
        let mut editor = GraphEditor::default();
        let outcome = editor.apply_mutation(GraphMutation::UpdateNode {
            id: NodeId::intern("missing-id"),
            patch: standard("x"),
        });
        assert_eq!(outcome, MutationOutcome::Ignored);

        let outcome = editor.apply_mutation(GraphMutation::DuplicateNode {
            id: NodeId::intern("missing-id"),
            offset: None,
        });
        assert_eq!(outcome, MutationOutcome::Ignored);
        assert!(editor.nodes().is_empty());
    }

    #[test]
    fn dispatch_from_canvas_json() {
        let mut editor = GraphEditor::default();
        let add: GraphMutation = serde_json::from_str(
            r#"{"type":"addNode","payload":{"type":"standard","label":"Start"},
                "position":{"x":1,"y":2}}"#,
        )
        .unwrap();
        let MutationOutcome::NodeAdded { id } = editor.apply_mutation(add) else {
            panic!("expected node to be added");
        };

        let select: GraphMutation = serde_json::from_value(serde_json::json!({
            "type": "nodeChanges",
            "changes": [{"type": "select", "id": id.as_str(), "selected": false}]
        }))
        .unwrap();
        assert_eq!(editor.apply_mutation(select), MutationOutcome::Updated);
        assert!(editor.nodes().selected_node_ids().is_empty());
    }

    #[test]
    fn lint_sees_stale_selection() {
        let mut editor = GraphEditor::default();
        editor.set_selected_node_ids(vec![NodeId::intern("ghost")]);
        let diags = editor.lint();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "stale-selection");
    }
}

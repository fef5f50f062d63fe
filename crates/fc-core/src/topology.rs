//! Graph view over a node list and an edge list.
//!
//! The stores keep nodes and edges in plain ordered vectors (that order is
//! the paint order and the persisted order). When a question needs
//! adjacency — which edges touch a node, which edges point nowhere — a
//! [`Topology`] is built on demand as a `petgraph` multigraph.

use crate::id::{EdgeId, NodeId};
use crate::model::{Edge, Node};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use smallvec::SmallVec;
use std::collections::{HashMap, HashSet};

/// Directed multigraph of node ids, with edge ids as weights.
#[derive(Debug, Clone)]
pub struct Topology {
    pub graph: StableDiGraph<NodeId, EdgeId>,
    index: HashMap<NodeId, NodeIndex>,
    /// Edges whose `source` or `target` names no node in the list.
    dangling: Vec<EdgeId>,
}

impl Topology {
    /// Build from the current collections. Edges with a missing endpoint
    /// are not inserted into the graph; they are recorded as dangling.
    #[must_use]
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = StableDiGraph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let idx = graph.add_node(node.id);
            index.insert(node.id, idx);
        }

        let mut dangling = Vec::new();
        for edge in edges {
            match (index.get(&edge.source), index.get(&edge.target)) {
                (Some(&from), Some(&to)) => {
                    graph.add_edge(from, to, edge.id);
                }
                _ => {
                    log::trace!("edge {} has a missing endpoint", edge.id);
                    dangling.push(edge.id);
                }
            }
        }

        Self {
            graph,
            index,
            dangling,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Edges whose endpoints are not in the node list, in edge-list order.
    pub fn dangling_edges(&self) -> &[EdgeId] {
        &self.dangling
    }

    /// Every edge that starts or ends at `id`. A self-loop is listed once.
    pub fn incident_edges(&self, id: NodeId) -> SmallVec<[EdgeId; 4]> {
        let Some(&idx) = self.index.get(&id) else {
            return SmallVec::new();
        };
        let mut seen = HashSet::new();
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.graph.edges_directed(idx, Direction::Incoming))
            .map(|e| *e.weight())
            .filter(|edge_id| seen.insert(*edge_id))
            .collect()
    }

    /// Groups of edges that join the same ordered (source, target) pair.
    /// Only groups with more than one edge are returned.
    pub fn parallel_edges(&self) -> Vec<Vec<EdgeId>> {
        let mut groups: HashMap<(NodeIndex, NodeIndex), Vec<EdgeId>> = HashMap::new();
        let mut order = Vec::new();
        for e in self.graph.edge_references() {
            let key = (e.source(), e.target());
            let group = groups.entry(key).or_default();
            if group.is_empty() {
                order.push(key);
            }
            group.push(*e.weight());
        }
        order
            .into_iter()
            .filter_map(|key| groups.remove(&key))
            .filter(|group| group.len() > 1)
            .collect()
    }

    /// Number of edges leaving `id`.
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.index
            .get(&id)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Connection, EdgeData, NodeData, Position, StandardData};

    fn node(id: &str) -> Node {
        Node::new(
            NodeId::intern(id),
            Position::default(),
            NodeData::Standard(StandardData::default()),
        )
    }

    fn edge(id: &str, from: &str, to: &str) -> Edge {
        Edge::new(
            EdgeId::intern(id),
            Connection::new(NodeId::intern(from), NodeId::intern(to)),
            EdgeData::default(),
        )
    }

    #[test]
    fn incident_edges_cover_both_directions() {
        let nodes = [node("t_a"), node("t_b"), node("t_c")];
        let edges = [
            edge("t_ab", "t_a", "t_b"),
            edge("t_ca", "t_c", "t_a"),
            edge("t_bc", "t_b", "t_c"),
        ];
        let topo = Topology::build(&nodes, &edges);
        let mut incident: Vec<&str> = topo
            .incident_edges(NodeId::intern("t_a"))
            .iter()
            .map(|e| e.as_str())
            .collect();
        incident.sort();
        assert_eq!(incident, vec!["t_ab", "t_ca"]);
        assert_eq!(topo.out_degree(NodeId::intern("t_b")), 1);
    }

    #[test]
    fn self_loop_listed_once() {
        let nodes = [node("t_loop")];
        let edges = [edge("t_self", "t_loop", "t_loop")];
        let topo = Topology::build(&nodes, &edges);
        assert_eq!(
            topo.incident_edges(NodeId::intern("t_loop")).as_slice(),
            &[EdgeId::intern("t_self")]
        );
    }

    #[test]
    fn missing_endpoint_is_dangling() {
        let nodes = [node("t_only")];
        let edges = [edge("t_orphan", "t_gone", "t_only")];
        let topo = Topology::build(&nodes, &edges);
        assert_eq!(topo.dangling_edges(), &[EdgeId::intern("t_orphan")]);
        assert!(topo.incident_edges(NodeId::intern("t_only")).is_empty());
    }

    #[test]
    fn parallel_edges_grouped_by_direction() {
        let nodes = [node("p_a"), node("p_b")];
        let edges = [
            edge("p_1", "p_a", "p_b"),
            edge("p_2", "p_a", "p_b"),
            edge("p_3", "p_b", "p_a"),
        ];
        let topo = Topology::build(&nodes, &edges);
        assert_eq!(
            topo.parallel_edges(),
            vec![vec![EdgeId::intern("p_1"), EdgeId::intern("p_2")]]
        );
    }
}

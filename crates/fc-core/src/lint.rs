//! Lint diagnostics for diagrams.
//!
//! Reports the states the editor tolerates without repairing them: edges
//! loaded with a missing endpoint, self-loops, parallel edges, and selection
//! ids that no longer name anything. Nothing here mutates the diagram.

use crate::id::{EdgeId, NodeId};
use crate::model::{Edge, Node};
use crate::topology::Topology;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// The diagram is in a tolerated but inconsistent state.
    Warning,
    /// Allowed on purpose; surfaced for the user's information.
    Info,
}

/// What a diagnostic points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintTarget {
    Node(NodeId),
    Edge(EdgeId),
}

/// A single lint diagnostic.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    pub target: LintTarget,
    /// Human-readable message.
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-edge", "self-loop").
    pub rule: &'static str,
}

/// Borrowed view of everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct LintInput<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub selected_node_ids: &'a [NodeId],
    pub selected_edge_ids: &'a [EdgeId],
}

// ─── Public API ──────────────────────────────────────────────────────────

/// Run all lint rules and return diagnostics in rule order.
#[must_use]
pub fn lint_graph(input: LintInput<'_>) -> Vec<LintDiagnostic> {
    let topology = Topology::build(input.nodes, input.edges);
    let mut diags = Vec::new();
    lint_dangling_edges(&topology, input.edges, &mut diags);
    lint_self_loops(input.edges, &mut diags);
    lint_parallel_edges(&topology, &mut diags);
    lint_stale_selection(&input, &mut diags);
    diags
}

// ─── Rules ───────────────────────────────────────────────────────────────

fn lint_dangling_edges(topology: &Topology, edges: &[Edge], diags: &mut Vec<LintDiagnostic>) {
    for &edge_id in topology.dangling_edges() {
        let Some(edge) = edges.iter().find(|e| e.id == edge_id) else {
            continue;
        };
        let missing: Vec<&str> = [edge.source, edge.target]
            .iter()
            .filter(|id| !topology.contains(**id))
            .map(|id| id.as_str())
            .collect();
        diags.push(LintDiagnostic {
            target: LintTarget::Edge(edge_id),
            message: format!(
                "Edge `{}` references missing node(s): {}.",
                edge_id,
                missing.join(", ")
            ),
            severity: LintSeverity::Warning,
            rule: "dangling-edge",
        });
    }
}

fn lint_self_loops(edges: &[Edge], diags: &mut Vec<LintDiagnostic>) {
    for edge in edges.iter().filter(|e| e.is_self_loop()) {
        diags.push(LintDiagnostic {
            target: LintTarget::Edge(edge.id),
            message: format!("Edge `{}` connects node `{}` to itself.", edge.id, edge.source),
            severity: LintSeverity::Info,
            rule: "self-loop",
        });
    }
}

/// One diagnostic per extra edge: the first edge of each group is left alone.
fn lint_parallel_edges(topology: &Topology, diags: &mut Vec<LintDiagnostic>) {
    for group in topology.parallel_edges() {
        let first = group[0];
        for &extra in &group[1..] {
            diags.push(LintDiagnostic {
                target: LintTarget::Edge(extra),
                message: format!("Edge `{extra}` duplicates edge `{first}`."),
                severity: LintSeverity::Info,
                rule: "duplicate-edge",
            });
        }
    }
}

fn lint_stale_selection(input: &LintInput<'_>, diags: &mut Vec<LintDiagnostic>) {
    let node_ids: HashSet<NodeId> = input.nodes.iter().map(|n| n.id).collect();
    for &id in input.selected_node_ids {
        if !node_ids.contains(&id) {
            diags.push(LintDiagnostic {
                target: LintTarget::Node(id),
                message: format!("Selected node `{id}` does not exist."),
                severity: LintSeverity::Info,
                rule: "stale-selection",
            });
        }
    }

    let edge_ids: HashSet<EdgeId> = input.edges.iter().map(|e| e.id).collect();
    for &id in input.selected_edge_ids {
        if !edge_ids.contains(&id) {
            diags.push(LintDiagnostic {
                target: LintTarget::Edge(id),
                message: format!("Selected edge `{id}` does not exist."),
                severity: LintSeverity::Info,
                rule: "stale-selection",
            });
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

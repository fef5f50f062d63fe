//! Integration tests: project records through the JSON and MessagePack codecs.
//!
//! The fixture mirrors a record as the persistence backend returns it:
//! older canvas settings without `snapToGrid`, sparse node payloads, and an
//! edge whose target node no longer exists.

use fc_core::id::{EdgeId, NodeId};
use fc_core::model::*;
use fc_core::{
    LintInput, lint_graph, project_from_json, project_from_msgpack, project_to_json,
    project_to_msgpack,
};
use pretty_assertions::assert_eq;

fn fixture() -> Project {
    project_from_json(include_str!("fixtures/onboarding.json")).unwrap()
}

#[test]
fn backend_record_fills_defaults() {
    let project = fixture();
    assert_eq!(project.version, 4);
    assert!(!project.canvas_settings.snap_to_grid);
    assert!(project.canvas_settings.grid_enabled);
    assert_eq!(project.canvas_settings.viewport, Viewport::default());

    let title = &project.nodes[0];
    assert_eq!(title.kind(), NodeKind::Header);
    let NodeData::Header(h) = &title.data else {
        panic!("expected header");
    };
    assert_eq!(h.text, "Onboarding");
    assert_eq!(h.width, 320.0);

    let NodeData::Standard(welcome) = &project.nodes[2].data else {
        panic!("expected standard");
    };
    assert_eq!(welcome.shape, NodeShape::Pill);
    assert_eq!(welcome.shadow, ShadowLevel::Lg);
    assert_eq!(welcome.width, 180.0);
    assert_eq!(welcome.color, "#808080");
}

#[test]
fn edges_keep_handles_and_default_style() {
    let project = fixture();
    let first = &project.edges[0];
    assert_eq!(first.source_handle.as_deref(), Some("right"));
    assert!(first.data.animated);
    assert_eq!(first.data.label.as_deref(), Some("on submit"));
    assert_eq!(first.data.curvature, 0.5);

    let second = &project.edges[1];
    assert_eq!(second.data, EdgeData::default());
}

#[test]
fn json_roundtrip_is_lossless() {
    let project = fixture();
    let json = project_to_json(&project).unwrap();
    let back = project_from_json(&json).unwrap();
    assert_eq!(back, project);
    assert!(json.contains("\"grid\":true"));
}

#[test]
fn msgpack_roundtrip_is_lossless() {
    let project = fixture();
    let bytes = project_to_msgpack(&project).unwrap();
    let back = project_from_msgpack(&bytes).unwrap();
    assert_eq!(back, project);
}

#[test]
fn orphaned_edge_is_loaded_and_reported() {
    let project = fixture();
    assert!(
        project
            .edges
            .iter()
            .any(|e| e.target == NodeId::intern("archived-step"))
    );

    let diags = lint_graph(LintInput {
        nodes: &project.nodes,
        edges: &project.edges,
        selected_node_ids: &[],
        selected_edge_ids: &[],
    });
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].rule, "dangling-edge");
    assert_eq!(
        diags[0].target,
        fc_core::LintTarget::Edge(EdgeId::intern("welcome-archived"))
    );
}

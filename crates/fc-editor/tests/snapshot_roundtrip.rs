//! Integration tests: assembling project snapshots and restoring them into
//! a fresh editor.

use fc_core::id::{EdgeId, NodeId};
use fc_core::model::*;
use fc_core::{LintTarget, project_from_json};
use fc_editor::{Clock, EditorConfig, GraphEditor, ProjectSession};
use pretty_assertions::assert_eq;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

fn session_at(now: i64) -> ProjectSession {
    ProjectSession::with_clock(EditorConfig::default(), Box::new(FixedClock(now)))
}

/// A small diagram: header, two steps, one styled edge, custom canvas.
fn sample_editor() -> (GraphEditor, NodeId, NodeId) {
    let mut editor = GraphEditor::default();
    editor.add_node(
        &NodePatch::Header(HeaderPatch {
            text: Some("Checkout".into()),
            level: Some(HeadingLevel::H2),
            ..Default::default()
        }),
        Position::new(20.0, 0.0),
    );
    let cart = editor.add_node(
        &NodePatch::Standard(StandardPatch {
            label: Some("Cart".into()),
            color: Some("#22c55e".into()),
            ..Default::default()
        }),
        Position::new(0.0, 100.0),
    );
    let pay = editor.add_node(
        &NodePatch::Standard(StandardPatch::label("Pay")),
        Position::new(300.0, 100.0),
    );
    editor
        .add_edge(
            Connection::new(cart, pay),
            &EdgePatch {
                animated: Some(true),
                pattern: Some(LinePattern::Dashed),
                ..Default::default()
            },
        )
        .unwrap();
    editor.canvas_mut().update_canvas_settings(&CanvasSettingsPatch {
        background: Some("#101010".into()),
        grid_size: Some(24.0),
        ..Default::default()
    });
    (editor, cart, pay)
}

#[test]
fn restore_reproduces_assembled_state() {
    init_logs();
    let (editor, _, _) = sample_editor();
    let mut session = session_at(5_000);
    session.create_new_project("Checkout", "", &mut GraphEditor::default());
    let snapshot = session.assemble_snapshot(&editor);

    let mut fresh = GraphEditor::default();
    let mut other = session_at(9_000);
    other.restore_snapshot(snapshot.clone(), &mut fresh);

    assert_eq!(fresh.nodes().nodes(), editor.nodes().nodes());
    assert_eq!(fresh.edges().edges(), editor.edges().edges());
    assert_eq!(fresh.canvas().settings(), editor.canvas().settings());
    assert!(fresh.nodes().selected_node_ids().is_empty());
    assert!(fresh.edges().selected_edge_ids().is_empty());
    assert_eq!(other.current_project(), Some(&snapshot));
}

#[test]
fn each_assembly_bumps_version() {
    init_logs();
    let (mut editor, cart, _) = sample_editor();
    let mut session = session_at(1_000);

    let first = session.assemble_snapshot(&editor);
    assert_eq!(first.version, 1);
    assert_eq!(first.name, "Untitled");

    editor.update_node(cart, &NodePatch::Standard(StandardPatch::label("Basket")));
    let second = session.assemble_snapshot(&editor);
    assert_eq!(second.version, 2);
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);

    let NodeData::Standard(s) = &second.nodes[1].data else {
        panic!("expected standard node");
    };
    assert_eq!(s.label, "Basket");
}

#[test]
fn snapshot_survives_json_encoding() {
    init_logs();
    let (editor, _, _) = sample_editor();
    let mut session = session_at(2_000);
    let snapshot = session.assemble_snapshot(&editor);

    let json = fc_core::project_to_json(&snapshot).unwrap();
    assert_eq!(project_from_json(&json).unwrap(), snapshot);
}

#[test]
fn restore_keeps_orphaned_edges() {
    init_logs();
    let project = project_from_json(include_str!("fixtures/support_triage.json")).unwrap();
    let mut editor = GraphEditor::default();
    let mut session = session_at(0);
    session.restore_snapshot(project, &mut editor);

    assert_eq!(editor.nodes().len(), 2);
    assert_eq!(editor.edges().len(), 3);
    let missing_target = editor.edges().get(EdgeId::intern("classify-escalate")).unwrap();
    assert_eq!(missing_target.data.pattern, LinePattern::Dashed);
    assert!(!editor.nodes().contains(missing_target.target));
    let missing_source = editor.edges().get(EdgeId::intern("intake-inbox")).unwrap();
    assert_eq!(missing_source.data.label.as_deref(), Some("email"));
    assert!(!editor.nodes().contains(missing_source.source));
    assert!(editor.nodes().contains(missing_source.target));

    let diags = editor.lint();
    let flagged: Vec<_> = diags.iter().map(|d| (d.rule, d.target)).collect();
    assert_eq!(
        flagged,
        vec![
            ("dangling-edge", LintTarget::Edge(EdgeId::intern("classify-escalate"))),
            ("dangling-edge", LintTarget::Edge(EdgeId::intern("intake-inbox"))),
        ]
    );
    assert!(diags[1].message.contains("intake"));

    // Creating the same connection by hand is refused.
    let classify = NodeId::intern("classify");
    assert_eq!(
        editor.connect(Connection::new(classify, NodeId::intern("escalate"))),
        None
    );
}

#[test]
fn restore_leaves_session_grid_visibility() {
    init_logs();
    let project = project_from_json(include_str!("fixtures/support_triage.json")).unwrap();
    let mut editor = GraphEditor::default();
    assert!(editor.canvas().is_grid_visible());

    let mut session = session_at(0);
    session.restore_snapshot(project, &mut editor);

    let settings = editor.canvas().settings();
    assert!(!settings.grid_enabled);
    assert!(settings.snap_to_grid);
    assert_eq!(settings.grid_size, 16.0);
    assert_eq!(
        settings.viewport,
        Viewport {
            x: -120.0,
            y: 40.0,
            zoom: 0.75
        }
    );
    assert!(editor.canvas().is_grid_visible());
}

#[test]
fn restore_replaces_rather_than_merges() {
    init_logs();
    let (mut editor, cart, _) = sample_editor();
    editor.set_selected_node_ids(vec![cart]);

    let project = project_from_json(include_str!("fixtures/support_triage.json")).unwrap();
    let mut session = session_at(0);
    session.restore_snapshot(project, &mut editor);

    assert!(!editor.nodes().contains(cart));
    let ids: Vec<&str> = editor.nodes().nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["inbox", "classify"]);
    assert!(editor.nodes().selected_node_ids().is_empty());
    assert_eq!(session.current_project().unwrap().version, 7);
}

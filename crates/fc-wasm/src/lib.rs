//! WASM bridge for the flow canvas — exposes the editor state to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Payloads cross the boundary
//! as JSON strings (MessagePack bytes for snapshots), so the bridge itself
//! stays testable on native targets.

use fc_core::change::{EdgeChange, NodeChange};
use fc_core::id::{EdgeId, NodeId};
use fc_core::model::{
    CanvasSettingsPatch, Connection, EdgePatch, NodePatch, Position, Project, Viewport,
};
use fc_editor::{
    Clock, EditorConfig, GraphEditor, GraphMutation, MemoryRepository, ProjectSession,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Timestamps from the host's `Date.now()`.
struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> i64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() as i64
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            fc_editor::SystemClock.now_ms()
        }
    }
}

/// The main WASM-facing editor handle.
///
/// One per open canvas. All interaction from the webview goes through it.
#[wasm_bindgen]
pub struct FlowEditor {
    editor: GraphEditor,
    session: ProjectSession,
    /// Page-lifetime project store; hosts with a real backend use the
    /// snapshot methods instead.
    repo: MemoryRepository,
}

#[wasm_bindgen]
impl FlowEditor {
    /// Create an editor. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).unwrap_or_else(|e| {
                log::warn!("invalid editor config, using defaults: {e}");
                EditorConfig::default()
            })
        };
        Self {
            editor: GraphEditor::new(&config),
            session: ProjectSession::with_clock(config, Box::new(JsClock)),
            repo: MemoryRepository::new(),
        }
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    /// Add a node from a partial payload (`{"type":"standard",...}`).
    /// Returns the new id, or an empty string if the payload is invalid.
    pub fn add_node(&mut self, payload_json: &str, x: f64, y: f64) -> String {
        match serde_json::from_str::<NodePatch>(payload_json) {
            Ok(payload) => self
                .editor
                .add_node(&payload, Position::new(x, y))
                .to_string(),
            Err(e) => {
                log::warn!("add_node: bad payload: {e}");
                String::new()
            }
        }
    }

    /// Merge a partial payload into a node. `false` if nothing changed.
    pub fn update_node(&mut self, node_id: &str, patch_json: &str) -> bool {
        match serde_json::from_str::<NodePatch>(patch_json) {
            Ok(patch) => self.editor.update_node(NodeId::intern(node_id), &patch),
            Err(e) => {
                log::warn!("update_node: bad patch: {e}");
                false
            }
        }
    }

    /// Duplicate a node with the configured offset. Returns the clone's id
    /// or an empty string.
    pub fn duplicate_node(&mut self, node_id: &str) -> String {
        self.editor
            .duplicate_node(NodeId::intern(node_id), None)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Delete nodes (JSON array of ids) and their edges.
    /// Returns `{"nodes":[...],"edges":[...]}`.
    pub fn delete_nodes(&mut self, ids_json: &str) -> String {
        let ids: Vec<NodeId> = parse_or_default(ids_json, "delete_nodes");
        to_json(&self.editor.delete_nodes(&ids))
    }

    /// Apply a node change-set from the canvas. Returns the applied mutation
    /// outcome as JSON.
    pub fn apply_node_changes(&mut self, changes_json: &str) -> String {
        let changes: Vec<NodeChange> = parse_or_default(changes_json, "apply_node_changes");
        to_json(&self.editor.apply_mutation(GraphMutation::NodeChanges { changes }))
    }

    pub fn get_nodes(&self) -> String {
        to_json(&self.editor.nodes().nodes())
    }

    pub fn get_selected_node_ids(&self) -> String {
        to_json(&self.editor.nodes().selected_node_ids())
    }

    pub fn set_selected_node_ids(&mut self, ids_json: &str) {
        let ids: Vec<NodeId> = parse_or_default(ids_json, "set_selected_node_ids");
        self.editor.set_selected_node_ids(ids);
    }

    // ─── Edges ───────────────────────────────────────────────────────────

    /// Drag-to-connect. Returns the new edge id, or an empty string when an
    /// endpoint does not exist.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        self.editor
            .connect(Connection::new(NodeId::intern(source), NodeId::intern(target)))
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Create a styled edge from a connection JSON and a partial edge payload.
    pub fn add_edge(&mut self, connection_json: &str, patch_json: &str) -> String {
        let Ok(connection) = serde_json::from_str::<Connection>(connection_json) else {
            log::warn!("add_edge: bad connection");
            return String::new();
        };
        let patch: EdgePatch = parse_or_default(patch_json, "add_edge");
        self.editor
            .add_edge(connection, &patch)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    pub fn update_edge(&mut self, edge_id: &str, patch_json: &str) -> bool {
        match serde_json::from_str::<EdgePatch>(patch_json) {
            Ok(patch) => self.editor.update_edge(EdgeId::intern(edge_id), &patch),
            Err(e) => {
                log::warn!("update_edge: bad patch: {e}");
                false
            }
        }
    }

    /// Delete edges by id. Returns the removed ids as JSON.
    pub fn delete_edges(&mut self, ids_json: &str) -> String {
        let ids: Vec<EdgeId> = parse_or_default(ids_json, "delete_edges");
        to_json(&self.editor.delete_edges(&ids))
    }

    pub fn apply_edge_changes(&mut self, changes_json: &str) -> String {
        let changes: Vec<EdgeChange> = parse_or_default(changes_json, "apply_edge_changes");
        to_json(&self.editor.apply_mutation(GraphMutation::EdgeChanges { changes }))
    }

    pub fn get_edges(&self) -> String {
        to_json(&self.editor.edges().edges())
    }

    pub fn get_selected_edge_ids(&self) -> String {
        to_json(&self.editor.edges().selected_edge_ids())
    }

    pub fn set_selected_edge_ids(&mut self, ids_json: &str) {
        let ids: Vec<EdgeId> = parse_or_default(ids_json, "set_selected_edge_ids");
        self.editor.set_selected_edge_ids(ids);
    }

    // ─── Whole graph ─────────────────────────────────────────────────────

    /// Apply any [`GraphMutation`] given as JSON (`{"type":"connect",...}`).
    /// Returns the outcome as JSON, or `{"type":"ignored"}` for bad input.
    pub fn apply_mutation(&mut self, mutation_json: &str) -> String {
        match serde_json::from_str::<GraphMutation>(mutation_json) {
            Ok(mutation) => to_json(&self.editor.apply_mutation(mutation)),
            Err(e) => {
                log::warn!("apply_mutation: bad mutation: {e}");
                r#"{"type":"ignored"}"#.to_string()
            }
        }
    }

    /// Delete selected nodes (with their edges) and selected edges.
    /// Returns `true` if anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        !self.editor.delete_selection().is_empty()
    }

    pub fn clear_selection(&mut self) {
        self.editor.clear_selection();
    }

    /// Lint diagnostics as `[{"target":..,"id":..,"rule":..,"severity":..,"message":..}]`.
    pub fn lint(&self) -> String {
        let diags: Vec<serde_json::Value> = self
            .editor
            .lint()
            .into_iter()
            .map(|d| {
                let (target, id) = match d.target {
                    fc_core::LintTarget::Node(id) => ("node", id.as_str()),
                    fc_core::LintTarget::Edge(id) => ("edge", id.as_str()),
                };
                serde_json::json!({
                    "target": target,
                    "id": id,
                    "rule": d.rule,
                    "severity": format!("{:?}", d.severity).to_lowercase(),
                    "message": d.message,
                })
            })
            .collect();
        serde_json::Value::Array(diags).to_string()
    }

    // ─── Canvas ──────────────────────────────────────────────────────────

    pub fn get_canvas_settings(&self) -> String {
        to_json(self.editor.canvas().settings())
    }

    /// Merge a partial canvas settings object. `false` on malformed input.
    pub fn update_canvas_settings(&mut self, patch_json: &str) -> bool {
        match serde_json::from_str::<CanvasSettingsPatch>(patch_json) {
            Ok(patch) => {
                self.editor.canvas_mut().update_canvas_settings(&patch);
                true
            }
            Err(e) => {
                log::warn!("update_canvas_settings: bad patch: {e}");
                false
            }
        }
    }

    pub fn set_viewport(&mut self, x: f64, y: f64, zoom: f64) {
        self.editor.canvas_mut().set_viewport(Viewport { x, y, zoom });
    }

    pub fn reset_view(&mut self) {
        self.editor.canvas_mut().reset_view();
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.editor.canvas_mut().toggle_grid()
    }

    pub fn toggle_snap_to_grid(&mut self) -> bool {
        self.editor.canvas_mut().toggle_snap_to_grid()
    }

    pub fn toggle_minimap(&mut self) -> bool {
        self.editor.canvas_mut().toggle_minimap()
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.editor.canvas_mut().toggle_panel()
    }

    pub fn toggle_animation(&mut self) -> bool {
        self.editor.canvas_mut().toggle_animation()
    }

    /// Session view flags: `{"grid":..,"minimap":..,"panel":..,"animation":..}`.
    pub fn get_view_flags(&self) -> String {
        let canvas = self.editor.canvas();
        serde_json::json!({
            "grid": canvas.is_grid_visible(),
            "minimap": canvas.is_minimap_visible(),
            "panel": canvas.is_panel_open(),
            "animation": canvas.is_animation_active(),
        })
        .to_string()
    }

    // ─── Project snapshots ───────────────────────────────────────────────

    /// Start a new empty project and return it as JSON.
    pub fn create_project(&mut self, name: &str, description: &str) -> String {
        to_json(
            self.session
                .create_new_project(name, description, &mut self.editor),
        )
    }

    pub fn update_project_metadata(&mut self, name: &str, description: &str) -> bool {
        self.session
            .update_project_metadata(Some(name), Some(description))
    }

    /// Assemble the next project version as JSON, for the host to persist.
    pub fn snapshot_json(&mut self) -> String {
        to_json(&self.session.assemble_snapshot(&self.editor))
    }

    /// Assemble the next project version as MessagePack bytes.
    pub fn snapshot_msgpack(&mut self) -> Vec<u8> {
        let project = self.session.assemble_snapshot(&self.editor);
        fc_core::project_to_msgpack(&project).unwrap_or_else(|e| {
            log::error!("snapshot_msgpack: {e}");
            Vec::new()
        })
    }

    /// Replace the editor state with a JSON project. `false` on malformed
    /// input (the editor is left untouched).
    pub fn restore_json(&mut self, project_json: &str) -> bool {
        match fc_core::project_from_json(project_json) {
            Ok(project) => {
                self.restore(project);
                true
            }
            Err(e) => {
                self.session.set_error(Some(e.to_string()));
                log::error!("restore_json: {e}");
                false
            }
        }
    }

    pub fn restore_msgpack(&mut self, bytes: &[u8]) -> bool {
        match fc_core::project_from_msgpack(bytes) {
            Ok(project) => {
                self.restore(project);
                true
            }
            Err(e) => {
                self.session.set_error(Some(e.to_string()));
                log::error!("restore_msgpack: {e}");
                false
            }
        }
    }

    // ─── In-page persistence ─────────────────────────────────────────────

    /// Save to the in-page repository. Returns the project id, or an empty
    /// string on failure (see [`get_error`](Self::get_error)).
    pub fn save_project(&mut self) -> String {
        match self.session.save(&self.editor, &mut self.repo) {
            Ok(()) => self
                .session
                .current_project()
                .map(|p| p.id.clone())
                .unwrap_or_default(),
            Err(_) => String::new(),
        }
    }

    pub fn load_project(&mut self, id: &str) -> bool {
        self.session.load(id, &mut self.editor, &self.repo).is_ok()
    }

    pub fn delete_project(&mut self, id: &str) -> bool {
        self.session.delete(id, &mut self.repo).is_ok()
    }

    /// The current project as JSON, or `null`.
    pub fn get_current_project(&self) -> String {
        to_json(&self.session.current_project())
    }

    /// Last persistence error, or an empty string.
    pub fn get_error(&self) -> String {
        self.session.error().unwrap_or_default().to_string()
    }

    pub fn clear_error(&mut self) {
        self.session.clear_error();
    }
}

impl FlowEditor {
    fn restore(&mut self, project: Project) {
        self.session.clear_error();
        self.session.restore_snapshot(project, &mut self.editor);
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialization failed: {e}");
        "null".to_string()
    })
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(json: &str, op: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("{op}: bad input, ignoring: {e}");
        T::default()
    })
}

/// Set up console panic hook for better WASM error messages.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("flow canvas WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone helpers (no editor needed) ───────────────────────────────

/// Check a project document. Returns `{"ok":true,"diagnostics":n}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_project(project_json: &str) -> String {
    match fc_core::project_from_json(project_json) {
        Ok(project) => {
            let diagnostics = fc_core::lint_graph(fc_core::LintInput {
                nodes: &project.nodes,
                edges: &project.edges,
                selected_node_ids: &[],
                selected_edge_ids: &[],
            });
            serde_json::json!({"ok": true, "diagnostics": diagnostics.len()}).to_string()
        }
        Err(e) => serde_json::json!({"ok": false, "error": e.to_string()}).to_string(),
    }
}

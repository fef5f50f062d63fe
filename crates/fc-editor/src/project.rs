//! Project session: turns the editor's stores into a persistable
//! [`Project`] snapshot and back.
//!
//! Saving and loading go through a [`ProjectRepository`]. A failed call is
//! recorded in [`ProjectSession::error`] and returned; the in-memory stores
//! are never rolled back and nothing is retried.

use crate::config::EditorConfig;
use crate::editor::GraphEditor;
use crate::persist::{PersistenceError, ProjectRepository};
use fc_core::model::Project;

/// Prefix of ids minted locally for projects the repository has not stored.
pub const LOCAL_ID_PREFIX: &str = "local:";

/// Wall-clock source for project timestamps (milliseconds since the epoch).
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

pub struct ProjectSession {
    config: EditorConfig,
    clock: Box<dyn Clock>,
    current: Option<Project>,
    /// Whether `current.id` is an id assigned by the repository.
    persisted: bool,
    last_saved_at: Option<i64>,
    error: Option<String>,
}

impl ProjectSession {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: EditorConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            current: None,
            persisted: false,
            last_saved_at: None,
            error: None,
        }
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// The last created, assembled, saved, or loaded project.
    pub fn current_project(&self) -> Option<&Project> {
        self.current.as_ref()
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn last_saved_at(&self) -> Option<i64> {
        self.last_saved_at
    }

    /// Message of the last failed save/load/delete, if not cleared since.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Start an empty, unsaved project at version 1 and reset the editor to
    /// match it.
    pub fn create_new_project(
        &mut self,
        name: &str,
        description: &str,
        editor: &mut GraphEditor,
    ) -> &Project {
        let now = self.clock.now_ms();
        let project = Project {
            id: format!("{LOCAL_ID_PREFIX}{}", uuid::Uuid::new_v4()),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
            version: 1,
            canvas_settings: self.config.default_canvas.clone(),
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        log::info!("new project `{name}` ({})", project.id);

        editor.set_nodes(Vec::new());
        editor.set_edges(Vec::new());
        editor.clear_selection();
        editor.canvas_mut().set_settings(project.canvas_settings.clone());

        self.persisted = false;
        self.last_saved_at = None;
        self.error = None;
        self.current.insert(project)
    }

    /// Rename or re-describe the current project. Returns `false` when no
    /// project is open.
    pub fn update_project_metadata(
        &mut self,
        name: Option<&str>,
        description: Option<&str>,
    ) -> bool {
        let now = self.clock.now_ms();
        let Some(project) = self.current.as_mut() else {
            return false;
        };
        if let Some(name) = name {
            project.name = name.to_string();
        }
        if let Some(description) = description {
            project.description = description.to_string();
        }
        project.updated_at = now;
        true
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    /// Copy the editor's nodes, edges, and canvas settings into a new
    /// snapshot one version past the current project, and make it current.
    ///
    /// With no open project the snapshot starts an untitled one at version 1.
    pub fn assemble_snapshot(&mut self, editor: &GraphEditor) -> Project {
        let snapshot = self.next_snapshot(editor);
        log::debug!("assembled `{}` v{}", snapshot.name, snapshot.version);
        self.current = Some(snapshot.clone());
        snapshot
    }

    /// Replace the editor's nodes, edges, and canvas settings with the
    /// snapshot's, wholesale. Selections are cleared.
    ///
    /// Edges are loaded as they are: one pointing at a missing node stays.
    /// Session-only view flags (grid visibility, minimap, ...) are untouched.
    /// A snapshot whose id was not minted locally counts as already stored,
    /// so the next save updates it instead of creating a copy.
    pub fn restore_snapshot(&mut self, project: Project, editor: &mut GraphEditor) {
        log::debug!(
            "restoring `{}` v{}: {} nodes, {} edges",
            project.name,
            project.version,
            project.nodes.len(),
            project.edges.len()
        );
        editor.set_nodes(project.nodes.clone());
        editor.set_edges(project.edges.clone());
        editor.clear_selection();
        editor.canvas_mut().set_settings(project.canvas_settings.clone());
        self.persisted = !project.id.starts_with(LOCAL_ID_PREFIX);
        self.current = Some(project);
    }

    fn next_snapshot(&self, editor: &GraphEditor) -> Project {
        let now = self.clock.now_ms();
        let (id, name, description, created_at, version) = match &self.current {
            Some(p) => (
                p.id.clone(),
                p.name.clone(),
                p.description.clone(),
                p.created_at,
                p.version,
            ),
            None => (
                format!("{LOCAL_ID_PREFIX}{}", uuid::Uuid::new_v4()),
                self.config.untitled_name.clone(),
                String::new(),
                now,
                0,
            ),
        };
        Project {
            id,
            name,
            description,
            created_at,
            updated_at: now,
            version: version + 1,
            canvas_settings: editor.canvas().settings().clone(),
            nodes: editor.nodes().nodes().to_vec(),
            edges: editor.edges().edges().to_vec(),
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Save the editor's state as the next version of the current project.
    ///
    /// A project the repository has never seen is created (and adopts the
    /// id the repository returns); otherwise it is updated in place. On
    /// failure the version is not bumped and the error message is kept.
    pub fn save(
        &mut self,
        editor: &GraphEditor,
        repo: &mut dyn ProjectRepository,
    ) -> Result<(), PersistenceError> {
        self.error = None;
        let mut snapshot = self.next_snapshot(editor);

        let result = if self.persisted {
            log::info!("updating project {} to v{}", snapshot.id, snapshot.version);
            repo.update_project(&snapshot).map(|()| snapshot.id.clone())
        } else {
            log::info!("creating project `{}`", snapshot.name);
            repo.create_project(&snapshot)
        };

        match result {
            Ok(id) => {
                snapshot.id = id;
                self.current = Some(snapshot);
                self.persisted = true;
                self.last_saved_at = Some(self.clock.now_ms());
                Ok(())
            }
            Err(err) => Err(self.fail("save", err)),
        }
    }

    /// Fetch a project and restore it into the editor.
    pub fn load(
        &mut self,
        id: &str,
        editor: &mut GraphEditor,
        repo: &dyn ProjectRepository,
    ) -> Result<(), PersistenceError> {
        self.error = None;
        log::info!("loading project {id}");
        match repo.get_project(id) {
            Ok(Some(project)) => {
                let updated_at = project.updated_at;
                self.restore_snapshot(project, editor);
                self.persisted = true;
                self.last_saved_at = Some(updated_at);
                Ok(())
            }
            Ok(None) => Err(self.fail("load", PersistenceError::NotFound)),
            Err(err) => Err(self.fail("load", err)),
        }
    }

    /// Delete a stored project. Closes it if it is the current one.
    pub fn delete(
        &mut self,
        id: &str,
        repo: &mut dyn ProjectRepository,
    ) -> Result<(), PersistenceError> {
        self.error = None;
        if let Err(err) = repo.delete_project(id) {
            return Err(self.fail("delete", err));
        }
        if self.current.as_ref().is_some_and(|p| p.id == id) {
            self.current = None;
            self.persisted = false;
            self.last_saved_at = None;
        }
        Ok(())
    }

    fn fail(&mut self, op: &str, err: PersistenceError) -> PersistenceError {
        log::error!("project {op} failed: {err}");
        self.error = Some(err.to_string());
        err
    }
}

impl Default for ProjectSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::model::{NodePatch, Position, StandardPatch};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that advances one second per reading.
    struct TickClock(Rc<Cell<i64>>);

    impl Clock for TickClock {
        fn now_ms(&self) -> i64 {
            let t = self.0.get() + 1_000;
            self.0.set(t);
            t
        }
    }

    fn session() -> ProjectSession {
        ProjectSession::with_clock(
            EditorConfig::default(),
            Box::new(TickClock(Rc::new(Cell::new(0)))),
        )
    }

    #[test]
    fn new_project_resets_editor() {
        let mut editor = GraphEditor::default();
        editor.add_node(&NodePatch::Standard(StandardPatch::label("stale")), Position::default());

        let mut session = session();
        let project = session.create_new_project("Flow", "demo", &mut editor);
        assert_eq!(project.version, 1);
        assert!(project.id.starts_with(LOCAL_ID_PREFIX));
        assert!(editor.nodes().is_empty());
        assert!(editor.nodes().selected_node_ids().is_empty());
        assert!(!session.is_persisted());
    }

    #[test]
    fn assemble_without_project_starts_untitled() {
        let editor = GraphEditor::default();
        let mut session = session();
        let snapshot = session.assemble_snapshot(&editor);
        assert_eq!(snapshot.name, "Untitled");
        assert_eq!(snapshot.version, 1);
        assert_eq!(session.assemble_snapshot(&editor).version, 2);
    }

    #[test]
    fn metadata_update_bumps_timestamp() {
        let mut editor = GraphEditor::default();
        let mut session = session();
        assert!(!session.update_project_metadata(Some("x"), None));

        let created = session.create_new_project("Flow", "", &mut editor).updated_at;
        assert!(session.update_project_metadata(Some("Renamed"), Some("desc")));
        let project = session.current_project().unwrap();
        assert_eq!(project.name, "Renamed");
        assert_eq!(project.description, "desc");
        assert!(project.updated_at > created);
    }
}

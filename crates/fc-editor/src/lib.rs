//! In-memory state for the flow canvas editor.
//!
//! [`GraphEditor`] owns the node, edge, and canvas stores and enforces the
//! cascade between them. [`ProjectSession`] turns that state into project
//! snapshots and moves them through a [`ProjectRepository`].

pub mod canvas;
pub mod config;
pub mod edges;
pub mod editor;
pub mod nodes;
pub mod persist;
pub mod project;

pub use canvas::CanvasStore;
pub use config::EditorConfig;
pub use edges::{EdgeChangeOutcome, EdgeStore, RemovedEdges};
pub use editor::{GraphEditor, GraphMutation, MutationOutcome, Removal};
pub use nodes::{NodeChangeOutcome, NodeStore, RemovedNodes};
pub use persist::{MemoryRepository, PersistenceError, ProjectRepository};
pub use project::{Clock, ProjectSession, SystemClock};

//! Persistence collaborator.
//!
//! The backend that stores project records lives outside this crate. The
//! editor talks to it through [`ProjectRepository`], one synchronous call per
//! operation, and never retries.

use fc_core::codec::{CodecError, project_from_json, project_to_json};
use fc_core::model::Project;
use std::collections::HashMap;

/// Failure reported by a [`ProjectRepository`].
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Project not found")]
    NotFound,
    #[error("{0}")]
    Backend(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// CRUD access to stored projects.
pub trait ProjectRepository {
    /// Store a new project and return the id the backend assigned to it.
    fn create_project(&mut self, project: &Project) -> Result<String, PersistenceError>;

    /// Fetch a project. `Ok(None)` when no project has that id.
    fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError>;

    /// Overwrite an existing project.
    fn update_project(&mut self, project: &Project) -> Result<(), PersistenceError>;

    fn delete_project(&mut self, id: &str) -> Result<(), PersistenceError>;
}

/// In-process repository. Ids are `projects:<n>`.
///
/// Records are kept as JSON documents, the same form a remote backend
/// receives, so every save/load goes through the codec.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: HashMap<String, String>,
    next_id: u64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProjectRepository for MemoryRepository {
    fn create_project(&mut self, project: &Project) -> Result<String, PersistenceError> {
        self.next_id += 1;
        let id = format!("projects:{}", self.next_id);
        let mut stored = project.clone();
        stored.id = id.clone();
        self.records.insert(id.clone(), project_to_json(&stored)?);
        Ok(id)
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>, PersistenceError> {
        match self.records.get(id) {
            Some(json) => Ok(Some(project_from_json(json)?)),
            None => Ok(None),
        }
    }

    fn update_project(&mut self, project: &Project) -> Result<(), PersistenceError> {
        if !self.records.contains_key(&project.id) {
            return Err(PersistenceError::NotFound);
        }
        let json = project_to_json(project)?;
        self.records.insert(project.id.clone(), json);
        Ok(())
    }

    fn delete_project(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or(PersistenceError::NotFound)
    }
}

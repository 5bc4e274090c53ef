//! Repository port for journal entry and project persistence.

use crate::journal::domain::{Project, ProjectId, TaskId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for journal repository operations.
pub type JournalRepositoryResult<T> = Result<T, JournalRepositoryError>;

/// Journal persistence contract.
///
/// Writes are last-write-wins; implementations provide no versioning.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Returns every stored entry with its bucket, oldest first.
    async fn list_tasks(&self) -> JournalRepositoryResult<Vec<TaskRecord>>;

    /// Finds an entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_task(&self, id: TaskId) -> JournalRepositoryResult<Option<TaskRecord>>;

    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn insert_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()>;

    /// Persists the status and timestamps of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalRepositoryError::TaskNotFound`] when the entry does
    /// not exist.
    async fn update_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()>;

    /// Removes an entry. Returns whether a stored entry was removed.
    async fn delete_task(&self, id: TaskId) -> JournalRepositoryResult<bool>;

    /// Persists a migration: updates `original` and inserts `continuation`
    /// as a single unit. Either both writes are applied or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`JournalRepositoryError::TaskNotFound`] when the original is
    /// missing or [`JournalRepositoryError::DuplicateTask`] when the
    /// continuation identifier already exists.
    async fn record_migration(
        &self,
        original: &TaskRecord,
        continuation: &TaskRecord,
    ) -> JournalRepositoryResult<()>;

    /// Returns every stored project, oldest first.
    async fn list_projects(&self) -> JournalRepositoryResult<Vec<Project>>;

    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`JournalRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn insert_project(&self, project: &Project) -> JournalRepositoryResult<()>;

    /// Removes a project. Returns whether a stored project was removed.
    ///
    /// Entries tagged with the project keep their reference.
    async fn delete_project(&self, id: ProjectId) -> JournalRepositoryResult<bool>;
}

/// Errors returned by journal repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JournalRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The entry was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JournalRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

//! Service layer for journal entry and project lifecycle.

use super::JournalSnapshot;
use crate::journal::{
    domain::{
        BucketError, BucketKey, EntryKind, MigrationTarget, Project, ProjectId, ProjectName, Task,
        TaskContent, TaskDomainError, TaskId, TaskRecord, TaskStatus,
    },
    ports::{JournalRepository, JournalRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for logging a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    bucket: BucketKey,
    content: String,
    kind: EntryKind,
    target_date: Option<NaiveDate>,
    project_id: Option<ProjectId>,
    display_date: Option<NaiveDate>,
}

impl AddTaskRequest {
    /// Creates a request for an entry in `bucket`.
    #[must_use]
    pub fn new(bucket: BucketKey, content: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            bucket,
            content: content.into(),
            kind,
            target_date: None,
            project_id: None,
            display_date: None,
        }
    }

    /// Files the entry under `date` instead of the request bucket.
    #[must_use]
    pub const fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Tags the entry with a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Sets the date shown next to the entry in master lists.
    #[must_use]
    pub const fn with_display_date(mut self, date: NaiveDate) -> Self {
        self.display_date = Some(date);
        self
    }

    /// Returns the bucket the entry will be filed under.
    #[must_use]
    pub fn effective_bucket(&self) -> BucketKey {
        self.target_date.map_or(self.bucket, BucketKey::from_date)
    }
}

/// Request payload for migrating an entry forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrateTaskRequest {
    /// Bucket the entry is migrated from.
    pub from: BucketKey,
    /// Entry to migrate.
    pub task_id: TaskId,
    /// Where the continuation lands.
    pub target: MigrationTarget,
}

impl MigrateTaskRequest {
    /// Creates a migration request.
    #[must_use]
    pub const fn new(from: BucketKey, task_id: TaskId, target: MigrationTarget) -> Self {
        Self {
            from,
            task_id,
            target,
        }
    }
}

/// Both halves of a completed migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOutcome {
    /// The original entry, now `migrated`, still in its source bucket.
    pub original: TaskRecord,
    /// The open continuation at the target bucket.
    pub continuation: TaskRecord,
}

/// Service-level errors for journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Domain validation or state machine rejection.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Bucket arithmetic failed.
    #[error(transparent)]
    Bucket(#[from] BucketError),
    /// The referenced entry does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JournalRepositoryError),
}

/// Result type for journal service operations.
pub type JournalResult<T> = Result<T, JournalError>;

/// Journal orchestration service.
#[derive(Clone)]
pub struct JournalService<R, C>
where
    R: JournalRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> JournalService<R, C>
where
    R: JournalRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new journal service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the clock used for timestamps.
    #[must_use]
    pub fn clock(&self) -> Arc<C> {
        Arc::clone(&self.clock)
    }

    /// Logs a new open entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Domain`] for empty content, before any
    /// repository call, or [`JournalError::Repository`] when persistence
    /// fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> JournalResult<TaskRecord> {
        let bucket = request.effective_bucket();
        let content = TaskContent::new(&request.content)?;
        let task = Task::new(content, request.kind, &*self.clock)
            .with_project(request.project_id)
            .with_display_date(request.display_date);
        let record = TaskRecord::new(bucket, task);
        self.repository.insert_task(&record).await?;
        Ok(record)
    }

    /// Moves an entry to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::TaskNotFound`] for unknown entries and
    /// [`JournalError::Domain`] when the state machine rejects the change,
    /// including any direct request for `migrated`.
    pub async fn update_task_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> JournalResult<TaskRecord> {
        self.mutate(task_id, |task, clock| task.transition_to(status, clock))
            .await
    }

    /// Flips an entry between open and done.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::TaskNotFound`] for unknown entries and
    /// [`JournalError::Domain`] for canceled or migrated entries.
    pub async fn toggle_done(&self, task_id: TaskId) -> JournalResult<TaskRecord> {
        self.mutate(task_id, |task, clock| task.toggle_done(clock))
            .await
    }

    /// Cancels an open entry.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::TaskNotFound`] for unknown entries and
    /// [`JournalError::Domain`] unless the entry is open.
    pub async fn cancel_task(&self, task_id: TaskId) -> JournalResult<TaskRecord> {
        self.mutate(task_id, |task, clock| task.cancel(clock))
            .await
    }

    /// Deletes an entry. Returns whether anything was removed; deleting an
    /// unknown entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Repository`] when persistence fails.
    pub async fn delete_task(&self, task_id: TaskId) -> JournalResult<bool> {
        Ok(self.repository.delete_task(task_id).await?)
    }

    /// Carries an open entry forward.
    ///
    /// The original stays in its bucket as `migrated`; an open continuation
    /// with a fresh identifier is filed under the target bucket computed
    /// from `request.from`. Both writes go through a single repository call.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::TaskNotFound`] for unknown entries,
    /// [`JournalError::Domain`] unless the entry is open,
    /// [`JournalError::Bucket`] when the target date is out of range, or
    /// [`JournalError::Repository`] when persistence fails.
    pub async fn migrate_task(
        &self,
        request: MigrateTaskRequest,
    ) -> JournalResult<MigrationOutcome> {
        let mut original = self.load(request.task_id).await?;
        let target_bucket = request.target.target_bucket(request.from)?;
        let continuation_task = original.task.migrate(&*self.clock)?;
        let continuation = TaskRecord::new(target_bucket, continuation_task);

        self.repository
            .record_migration(&original, &continuation)
            .await?;
        info!(
            task_id = %original.task.id(),
            continuation_id = %continuation.task.id(),
            from = %request.from,
            to = %target_bucket,
            target = %request.target,
            "migrated task"
        );
        Ok(MigrationOutcome {
            original,
            continuation,
        })
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Domain`] for empty names, before any
    /// repository call, or [`JournalError::Repository`] when persistence
    /// fails.
    pub async fn add_project(&self, name: &str) -> JournalResult<Project> {
        let project = Project::new(ProjectName::new(name)?, &*self.clock);
        self.repository.insert_project(&project).await?;
        Ok(project)
    }

    /// Deletes a project. Entries tagged with it keep their reference.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Repository`] when persistence fails.
    pub async fn delete_project(&self, project_id: ProjectId) -> JournalResult<bool> {
        Ok(self.repository.delete_project(project_id).await?)
    }

    /// Loads every entry and project into a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Repository`] when either listing fails.
    pub async fn load_snapshot(&self) -> JournalResult<JournalSnapshot> {
        let records = self.repository.list_tasks().await?;
        let projects = self.repository.list_projects().await?;
        Ok(JournalSnapshot::from_parts(records, projects))
    }

    async fn load(&self, task_id: TaskId) -> JournalResult<TaskRecord> {
        self.repository
            .find_task(task_id)
            .await?
            .ok_or(JournalError::TaskNotFound(task_id))
    }

    async fn mutate<F>(&self, task_id: TaskId, change: F) -> JournalResult<TaskRecord>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut record = self.load(task_id).await?;
        change(&mut record.task, &*self.clock)?;
        self.repository.update_task(&record).await?;
        Ok(record)
    }
}

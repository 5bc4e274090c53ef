//! State-owning boundary between journal views and the service layer.
//!
//! A [`JournalSession`] holds the bucketed entry map and project list,
//! reloads both wholesale after every confirmed mutation, and turns failures
//! into transient [`Notice`]s instead of returning errors to rendering code.
//!
//! Concurrent mutations are not ordered: whichever reload finishes last
//! wins. There is no locking or versioning against the store.

use super::{
    AddTaskRequest, JournalError, JournalResult, JournalService, JournalSnapshot,
    MigrateTaskRequest, Notice, notice::NoticeBoard,
};
use crate::config::ConfigurationError;
use crate::journal::{
    domain::{
        BucketKey, MigrationTarget, Project, ProjectId, Task, TaskDomainError, TaskId,
        TaskRecord, TaskStatus,
    },
    ports::JournalRepository,
};
use chrono::TimeDelta;
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Result of a session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The change was persisted and the snapshot reloaded.
    Applied,
    /// Empty input; nothing was sent to the store.
    Ignored,
    /// Refused by the state machine or aimed at an unknown entry. A notice
    /// was raised.
    Rejected,
    /// The store reported an error. A notice was raised and the snapshot
    /// left unchanged. A write that persisted but could not be reloaded also
    /// ends here; the snapshot stays stale until the next successful reload.
    Failed,
    /// The session has no store.
    Unavailable,
}

/// Whether the session is backed by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// A store is configured.
    Ready,
    /// No store could be configured at startup. Reads are empty and
    /// mutations return [`Outcome::Unavailable`] for the session's lifetime.
    Degraded(ConfigurationError),
}

enum Backend<R, C>
where
    R: JournalRepository,
    C: Clock + Send + Sync,
{
    Ready(JournalService<R, C>),
    Degraded(ConfigurationError),
}

struct SessionState {
    snapshot: JournalSnapshot,
    notices: NoticeBoard,
}

/// Owner of the in-memory journal state.
pub struct JournalSession<R, C>
where
    R: JournalRepository,
    C: Clock + Send + Sync,
{
    backend: Backend<R, C>,
    clock: Arc<C>,
    state: RwLock<SessionState>,
}

impl<R, C> JournalSession<R, C>
where
    R: JournalRepository,
    C: Clock + Send + Sync,
{
    /// Creates a session backed by `service`. The snapshot starts empty;
    /// call [`JournalSession::reload`] to populate it.
    #[must_use]
    pub fn new(service: JournalService<R, C>, notice_ttl: TimeDelta) -> Self {
        let clock = service.clock();
        Self::with_backend(Backend::Ready(service), clock, notice_ttl)
    }

    /// Creates a degraded session for when no store could be configured.
    #[must_use]
    pub fn unconfigured(reason: ConfigurationError, clock: Arc<C>, notice_ttl: TimeDelta) -> Self {
        warn!(%reason, "journal store unavailable, starting in degraded mode");
        Self::with_backend(Backend::Degraded(reason), clock, notice_ttl)
    }

    fn with_backend(backend: Backend<R, C>, clock: Arc<C>, notice_ttl: TimeDelta) -> Self {
        Self {
            backend,
            clock,
            state: RwLock::new(SessionState {
                snapshot: JournalSnapshot::default(),
                notices: NoticeBoard::new(notice_ttl),
            }),
        }
    }

    /// Returns whether the session is backed by a store.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match &self.backend {
            Backend::Ready(_) => SessionStatus::Ready,
            Backend::Degraded(reason) => SessionStatus::Degraded(reason.clone()),
        }
    }

    /// Replaces the snapshot with a fresh load from the store.
    pub async fn reload(&self) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        match service.load_snapshot().await {
            Ok(snapshot) => {
                debug!(
                    buckets = snapshot.task_map().len(),
                    projects = snapshot.projects().len(),
                    "reloaded journal"
                );
                self.write_state().snapshot = snapshot;
                Outcome::Applied
            }
            Err(err) => self.fail("load the journal", &err),
        }
    }

    /// Logs a new entry. Empty content is ignored without touching the
    /// store.
    pub async fn add_task(&self, request: AddTaskRequest) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(bucket = %request.effective_bucket(), "adding task");
        let result = service.add_task(request).await;
        self.settle("add the task", result).await
    }

    /// Moves an entry in `bucket` to `status`.
    pub async fn update_task_status(
        &self,
        bucket: BucketKey,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%bucket, %task_id, %status, "updating task status");
        let result = service.update_task_status(task_id, status).await;
        self.settle("update the task", result).await
    }

    /// Flips an entry in `bucket` between open and done.
    pub async fn toggle_done(&self, bucket: BucketKey, task_id: TaskId) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%bucket, %task_id, "toggling task");
        let result = service.toggle_done(task_id).await;
        self.settle("update the task", result).await
    }

    /// Cancels an open entry in `bucket`.
    pub async fn cancel_task(&self, bucket: BucketKey, task_id: TaskId) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%bucket, %task_id, "canceling task");
        let result = service.cancel_task(task_id).await;
        self.settle("cancel the task", result).await
    }

    /// Deletes an entry in `bucket`. Deleting an unknown entry still counts
    /// as applied.
    pub async fn delete_task(&self, bucket: BucketKey, task_id: TaskId) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%bucket, %task_id, "deleting task");
        let result = service.delete_task(task_id).await;
        self.settle("delete the task", result).await
    }

    /// Carries an open entry from `from` to the bucket chosen by `target`.
    pub async fn migrate_task(
        &self,
        from: BucketKey,
        task_id: TaskId,
        target: MigrationTarget,
    ) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%from, %task_id, %target, "migrating task");
        let result = service
            .migrate_task(MigrateTaskRequest::new(from, task_id, target))
            .await;
        self.settle("migrate the task", result).await
    }

    /// Creates a project. Empty names are ignored without touching the
    /// store.
    pub async fn add_project(&self, name: &str) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        let result = service.add_project(name).await;
        self.settle("add the project", result).await
    }

    /// Deletes a project. Entries tagged with it keep the dangling
    /// reference.
    pub async fn delete_project(&self, project_id: ProjectId) -> Outcome {
        let Some(service) = self.service() else {
            return Outcome::Unavailable;
        };
        debug!(%project_id, "deleting project");
        let result = service.delete_project(project_id).await;
        self.settle("delete the project", result).await
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> JournalSnapshot {
        self.read_state().snapshot.clone()
    }

    /// Returns the entries filed under `bucket`.
    #[must_use]
    pub fn tasks_for(&self, bucket: BucketKey) -> Vec<Task> {
        self.read_state().snapshot.tasks_for(bucket).to_vec()
    }

    /// Returns the full bucket map.
    #[must_use]
    pub fn task_map(&self) -> BTreeMap<BucketKey, Vec<Task>> {
        self.read_state().snapshot.task_map().clone()
    }

    /// Counts open entries in `bucket`.
    #[must_use]
    pub fn open_task_count(&self, bucket: BucketKey) -> usize {
        self.read_state().snapshot.open_task_count(bucket)
    }

    /// Returns the project list.
    #[must_use]
    pub fn projects(&self) -> Vec<Project> {
        self.read_state().snapshot.projects().to_vec()
    }

    /// Looks up a project. Returns `None` for dangling references.
    #[must_use]
    pub fn project(&self, project_id: ProjectId) -> Option<Project> {
        self.read_state().snapshot.project(project_id).cloned()
    }

    /// Returns every entry tagged with `project_id`, across all buckets.
    #[must_use]
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<TaskRecord> {
        self.read_state().snapshot.tasks_for_project(project_id)
    }

    /// Returns the notices that have not yet expired.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.read_state().notices.active(self.clock.utc())
    }

    const fn service(&self) -> Option<&JournalService<R, C>> {
        match &self.backend {
            Backend::Ready(service) => Some(service),
            Backend::Degraded(_) => None,
        }
    }

    async fn settle<T>(&self, action: &'static str, result: JournalResult<T>) -> Outcome {
        match result {
            Ok(_) => self.reload().await,
            Err(JournalError::Domain(
                TaskDomainError::EmptyContent | TaskDomainError::EmptyProjectName,
            )) => Outcome::Ignored,
            Err(err @ JournalError::Repository(_)) => self.fail(action, &err),
            Err(err) => {
                debug!(action, error = %err, "journal operation rejected");
                self.raise(format!("Could not {action}: {err}"));
                Outcome::Rejected
            }
        }
    }

    fn fail(&self, action: &'static str, err: &JournalError) -> Outcome {
        warn!(action, error = %err, "journal operation failed");
        self.raise(format!("Could not {action}: {err}"));
        Outcome::Failed
    }

    fn raise(&self, message: String) {
        let now = self.clock.utc();
        self.write_state().notices.raise(message, now);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

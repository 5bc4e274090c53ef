//! Journal entry aggregate and its status state machine.

use super::{BucketKey, ParseJournalValueError, ProjectId, TaskContent, TaskDomainError, TaskId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rapid-logging entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Something to do.
    Task,
    /// Something scheduled or something that happened.
    Event,
    /// A fact, idea or observation.
    Note,
}

impl EntryKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Event => "event",
            Self::Note => "note",
        }
    }

    /// Returns the rapid-logging bullet for this kind.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Task => "•",
            Self::Event => "○",
            Self::Note => "–",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = ParseJournalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task" => Ok(Self::Task),
            "event" => Ok(Self::Event),
            "note" => Ok(Self::Note),
            _ => Err(ParseJournalValueError::new("entry kind", value)),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry status.
///
/// `Open` and `Done` toggle into each other. `Canceled` and `Migrated` are
/// terminal, and `Migrated` is only ever reached through
/// [`Task::migrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still actionable.
    Open,
    /// Completed.
    Done,
    /// Abandoned.
    Canceled,
    /// Carried forward to a later bucket.
    Migrated,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
            Self::Canceled => "canceled",
            Self::Migrated => "migrated",
        }
    }

    /// Returns the rapid-logging status mark. Open entries carry none.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Open => "",
            Self::Done => "✔",
            Self::Canceled => "✖",
            Self::Migrated => "↦",
        }
    }

    /// Returns whether the state machine permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Done | Self::Canceled | Self::Migrated) | (Self::Done, Self::Open)
        )
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Migrated)
    }

    /// Returns whether the entry can still be completed, canceled or
    /// migrated.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns the status a done-toggle moves to, if any.
    #[must_use]
    pub const fn toggled(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::Done),
            Self::Done => Some(Self::Open),
            Self::Canceled | Self::Migrated => None,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseJournalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            "canceled" => Ok(Self::Canceled),
            "migrated" => Ok(Self::Migrated),
            _ => Err(ParseJournalValueError::new("task status", value)),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Journal entry aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    content: TaskContent,
    kind: EntryKind,
    status: TaskStatus,
    project_id: Option<ProjectId>,
    display_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted entry text.
    pub content: TaskContent,
    /// Persisted entry kind.
    pub kind: EntryKind,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted project reference, if any. May dangle.
    pub project_id: Option<ProjectId>,
    /// Persisted display date, if any.
    pub display_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest status change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open entry.
    #[must_use]
    pub fn new(content: TaskContent, kind: EntryKind, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            content,
            kind,
            status: TaskStatus::Open,
            project_id: None,
            display_date: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets the project this entry is tagged with.
    #[must_use]
    pub const fn with_project(mut self, project_id: Option<ProjectId>) -> Self {
        self.project_id = project_id;
        self
    }

    /// Sets the optional date shown next to the entry in master lists.
    #[must_use]
    pub const fn with_display_date(mut self, display_date: Option<NaiveDate>) -> Self {
        self.display_date = display_date;
        self
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            kind: data.kind,
            status: data.status,
            project_id: data.project_id,
            display_date: data.display_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the entry text.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the tagged project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the display date, if any.
    #[must_use]
    pub const fn display_date(&self) -> Option<NaiveDate> {
        self.display_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest status change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the entry to `target`.
    ///
    /// [`TaskStatus::Migrated`] is never accepted here; use
    /// [`Task::migrate`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when the state
    /// machine does not permit the change.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if target == TaskStatus::Migrated {
            return Err(self.rejected(target));
        }
        self.apply(target, clock)
    }

    /// Flips between open and done.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] for canceled or
    /// migrated entries.
    pub fn toggle_done(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        match self.status.toggled() {
            Some(next) => self.apply(next, clock),
            None => Err(self.rejected(TaskStatus::Done)),
        }
    }

    /// Cancels an open entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the entry
    /// is open.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.apply(TaskStatus::Canceled, clock)
    }

    /// Marks this entry migrated and returns its open continuation.
    ///
    /// The continuation has a fresh identifier and carries over content,
    /// kind, project and display date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] unless the entry
    /// is open.
    pub fn migrate(&mut self, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        self.apply(TaskStatus::Migrated, clock)?;
        Ok(Self::new(self.content.clone(), self.kind, clock)
            .with_project(self.project_id)
            .with_display_date(self.display_date))
    }

    fn apply(&mut self, target: TaskStatus, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.rejected(target));
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }

    const fn rejected(&self, target: TaskStatus) -> TaskDomainError {
        TaskDomainError::InvalidStateTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        }
    }
}

/// A task together with the bucket it is filed under.
///
/// The bucket is the storage partition rather than a property of the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Owning bucket.
    pub bucket: BucketKey,
    /// The entry itself.
    pub task: Task,
}

impl TaskRecord {
    /// Pairs a task with its bucket.
    #[must_use]
    pub const fn new(bucket: BucketKey, task: Task) -> Self {
        Self { bucket, task }
    }
}

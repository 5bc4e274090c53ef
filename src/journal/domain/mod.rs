//! Domain model for the journal.
//!
//! Everything here is pure: bucket arithmetic, the task status state
//! machine and migration targeting never touch storage.

mod bucket;
mod error;
mod ids;
mod migration;
mod project;
mod task;
mod view;

pub use bucket::{
    BucketKey, add_days, add_months_clamp_to_first, start_of_month, start_of_week, to_iso_date,
};
pub use error::{BucketError, ParseJournalValueError, TaskDomainError};
pub use ids::{ProjectId, ProjectName, TaskContent, TaskId};
pub use migration::MigrationTarget;
pub use project::{PersistedProjectData, Project};
pub use task::{EntryKind, PersistedTaskData, Task, TaskRecord, TaskStatus};
pub use view::LogView;

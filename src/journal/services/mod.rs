//! Application services for the journal.

mod lifecycle;
mod notice;
mod session;
mod snapshot;

pub use lifecycle::{
    AddTaskRequest, JournalError, JournalResult, JournalService, MigrateTaskRequest,
    MigrationOutcome,
};
pub use notice::Notice;
pub use session::{JournalSession, Outcome, SessionStatus};
pub use snapshot::JournalSnapshot;

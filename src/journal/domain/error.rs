//! Error types for journal domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or mutating journal entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Task content is empty after trimming.
    #[error("task content must not be empty")]
    EmptyContent,

    /// Project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The requested status change is not permitted by the state machine.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task whose status change was rejected.
        task_id: TaskId,
        /// Status at the time of the request.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

/// Errors returned by bucket key parsing and date arithmetic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BucketError {
    /// The value is not a real calendar date in `YYYY-MM-DD` form.
    #[error("invalid bucket date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Date arithmetic left the representable calendar range.
    #[error("date arithmetic from {0} is out of range")]
    OutOfRange(NaiveDate),
}

/// Error returned while parsing an enumerated journal value from storage or
/// user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseJournalValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: String,
}

impl ParseJournalValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

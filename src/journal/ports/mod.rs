//! Port contracts for the journal.
//!
//! Ports define infrastructure-agnostic interfaces used by journal services.

pub mod repository;

pub use repository::{JournalRepository, JournalRepositoryError, JournalRepositoryResult};

//! `PostgreSQL` adapters for journal persistence.

mod models;
mod repository;
mod schema;

pub use repository::{JournalPgPool, PostgresJournalRepository};

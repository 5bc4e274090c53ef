//! Diesel row models for journal persistence.

use super::schema::{projects, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for journal entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Entry text.
    pub content: String,
    /// Entry kind.
    pub kind: String,
    /// Entry status.
    pub status: String,
    /// Owning bucket key.
    pub date_str: String,
    /// Optional project reference.
    pub project_id: Option<uuid::Uuid>,
    /// Optional display date.
    pub display_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last status change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for journal entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Entry text.
    pub content: String,
    /// Entry kind.
    pub kind: String,
    /// Entry status.
    pub status: String,
    /// Owning bucket key.
    pub date_str: String,
    /// Optional project reference.
    pub project_id: Option<uuid::Uuid>,
    /// Optional display date.
    pub display_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last status change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for projects.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

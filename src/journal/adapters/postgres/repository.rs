//! `PostgreSQL` repository implementation for journal storage.

use super::{
    models::{NewTaskRow, ProjectRow, TaskRow},
    schema::{projects, tasks},
};
use crate::journal::{
    domain::{
        BucketKey, EntryKind, PersistedProjectData, PersistedTaskData, Project, ProjectId,
        ProjectName, Task, TaskContent, TaskId, TaskRecord, TaskStatus,
    },
    ports::{JournalRepository, JournalRepositoryError, JournalRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by journal adapters.
pub type JournalPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed journal repository.
#[derive(Debug, Clone)]
pub struct PostgresJournalRepository {
    pool: JournalPgPool,
}

impl PostgresJournalRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: JournalPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JournalRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JournalRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JournalRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JournalRepositoryError::persistence)?
    }
}

#[async_trait]
impl JournalRepository for PostgresJournalRepository {
    async fn list_tasks(&self) -> JournalRepositoryResult<Vec<TaskRecord>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(JournalRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> JournalRepositoryResult<Option<TaskRecord>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(JournalRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn insert_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()> {
        let task_id = record.task.id();
        let new_row = to_new_row(record);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        JournalRepositoryError::DuplicateTask(task_id)
                    }
                    _ => JournalRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()> {
        let update = StatusUpdate::from_record(record);
        self.run_blocking(move |connection| {
            let affected = update
                .apply(connection)
                .map_err(JournalRepositoryError::persistence)?;
            if affected == 0 {
                return Err(JournalRepositoryError::TaskNotFound(update.id));
            }
            Ok(())
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> JournalRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(JournalRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn record_migration(
        &self,
        original: &TaskRecord,
        continuation: &TaskRecord,
    ) -> JournalRepositoryResult<()> {
        let update = StatusUpdate::from_record(original);
        let continuation_id = continuation.task.id();
        let new_row = to_new_row(continuation);
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    if update.apply(tx)? == 0 {
                        return Err(DieselError::NotFound);
                    }
                    diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .execute(tx)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => JournalRepositoryError::TaskNotFound(update.id),
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        JournalRepositoryError::DuplicateTask(continuation_id)
                    }
                    _ => JournalRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn list_projects(&self) -> JournalRepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            let rows = projects::table
                .order((projects::created_at.asc(), projects::id.asc()))
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(JournalRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn insert_project(&self, project: &Project) -> JournalRepositoryResult<()> {
        let project_id = project.id();
        let new_row = ProjectRow {
            id: project_id.into_inner(),
            name: project.name().as_str().to_owned(),
            created_at: project.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        JournalRepositoryError::DuplicateProject(project_id)
                    }
                    _ => JournalRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> JournalRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(JournalRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

/// Status columns written when an entry changes state.
struct StatusUpdate {
    id: TaskId,
    status: &'static str,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl StatusUpdate {
    fn from_record(record: &TaskRecord) -> Self {
        Self {
            id: record.task.id(),
            status: record.task.status().as_str(),
            updated_at: record.task.updated_at(),
        }
    }

    fn apply(&self, connection: &mut PgConnection) -> Result<usize, DieselError> {
        diesel::update(tasks::table.filter(tasks::id.eq(self.id.into_inner())))
            .set((
                tasks::status.eq(self.status),
                tasks::updated_at.eq(self.updated_at),
            ))
            .execute(connection)
    }
}

fn to_new_row(record: &TaskRecord) -> NewTaskRow {
    let task = &record.task;
    NewTaskRow {
        id: task.id().into_inner(),
        content: task.content().as_str().to_owned(),
        kind: task.kind().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        date_str: record.bucket.to_string(),
        project_id: task.project_id().map(ProjectId::into_inner),
        display_date: task.display_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_record(row: TaskRow) -> JournalRepositoryResult<TaskRecord> {
    let TaskRow {
        id,
        content: persisted_content,
        kind: persisted_kind,
        status: persisted_status,
        date_str,
        project_id,
        display_date,
        created_at,
        updated_at,
    } = row;

    let bucket = BucketKey::parse(&date_str).map_err(JournalRepositoryError::persistence)?;
    let content =
        TaskContent::new(persisted_content).map_err(JournalRepositoryError::persistence)?;
    let kind =
        EntryKind::try_from(persisted_kind.as_str()).map_err(JournalRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(JournalRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        content,
        kind,
        status,
        project_id: project_id.map(ProjectId::from_uuid),
        display_date,
        created_at,
        updated_at,
    };
    Ok(TaskRecord::new(bucket, Task::from_persisted(data)))
}

fn row_to_project(row: ProjectRow) -> JournalRepositoryResult<Project> {
    let name = ProjectName::new(row.name).map_err(JournalRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name,
        created_at: row.created_at,
    }))
}

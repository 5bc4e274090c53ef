//! In-memory repository for journal tests and local use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::journal::{
    domain::{Project, ProjectId, TaskId, TaskRecord},
    ports::{JournalRepository, JournalRepositoryError, JournalRepositoryResult},
};

/// Thread-safe in-memory journal repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJournalRepository {
    state: Arc<RwLock<InMemoryJournalState>>,
}

#[derive(Debug, Default)]
struct InMemoryJournalState {
    tasks: HashMap<TaskId, TaskRecord>,
    task_order: Vec<TaskId>,
    projects: Vec<Project>,
}

impl InMemoryJournalRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> JournalRepositoryResult<RwLockReadGuard<'_, InMemoryJournalState>> {
        self.state.read().map_err(|err| {
            JournalRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> JournalRepositoryResult<RwLockWriteGuard<'_, InMemoryJournalState>> {
        self.state.write().map_err(|err| {
            JournalRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn insert_record(state: &mut InMemoryJournalState, record: &TaskRecord) {
    let id = record.task.id();
    state.task_order.push(id);
    state.tasks.insert(id, record.clone());
}

fn replace_record(
    state: &mut InMemoryJournalState,
    record: &TaskRecord,
) -> JournalRepositoryResult<()> {
    let id = record.task.id();
    let stored = state
        .tasks
        .get_mut(&id)
        .ok_or(JournalRepositoryError::TaskNotFound(id))?;
    *stored = record.clone();
    Ok(())
}

#[async_trait]
impl JournalRepository for InMemoryJournalRepository {
    async fn list_tasks(&self) -> JournalRepositoryResult<Vec<TaskRecord>> {
        let state = self.read()?;
        Ok(state
            .task_order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn find_task(&self, id: TaskId) -> JournalRepositoryResult<Option<TaskRecord>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn insert_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&record.task.id()) {
            return Err(JournalRepositoryError::DuplicateTask(record.task.id()));
        }
        insert_record(&mut state, record);
        Ok(())
    }

    async fn update_task(&self, record: &TaskRecord) -> JournalRepositoryResult<()> {
        let mut state = self.write()?;
        replace_record(&mut state, record)
    }

    async fn delete_task(&self, id: TaskId) -> JournalRepositoryResult<bool> {
        let mut state = self.write()?;
        let removed = state.tasks.remove(&id).is_some();
        if removed {
            state.task_order.retain(|stored| *stored != id);
        }
        Ok(removed)
    }

    async fn record_migration(
        &self,
        original: &TaskRecord,
        continuation: &TaskRecord,
    ) -> JournalRepositoryResult<()> {
        let mut state = self.write()?;
        // Validate both writes before applying either.
        if !state.tasks.contains_key(&original.task.id()) {
            return Err(JournalRepositoryError::TaskNotFound(original.task.id()));
        }
        if state.tasks.contains_key(&continuation.task.id()) {
            return Err(JournalRepositoryError::DuplicateTask(
                continuation.task.id(),
            ));
        }
        replace_record(&mut state, original)?;
        insert_record(&mut state, continuation);
        Ok(())
    }

    async fn list_projects(&self) -> JournalRepositoryResult<Vec<Project>> {
        let state = self.read()?;
        Ok(state.projects.clone())
    }

    async fn insert_project(&self, project: &Project) -> JournalRepositoryResult<()> {
        let mut state = self.write()?;
        if state.projects.iter().any(|stored| stored.id() == project.id()) {
            return Err(JournalRepositoryError::DuplicateProject(project.id()));
        }
        state.projects.push(project.clone());
        Ok(())
    }

    async fn delete_project(&self, id: ProjectId) -> JournalRepositoryResult<bool> {
        let mut state = self.write()?;
        let before = state.projects.len();
        state.projects.retain(|stored| stored.id() != id);
        Ok(state.projects.len() != before)
    }
}

//! Bucketed read model rebuilt from the repository after each mutation.

use crate::journal::domain::{BucketKey, Project, ProjectId, Task, TaskRecord, TaskStatus};
use std::collections::BTreeMap;

/// Entries grouped by bucket, plus the project list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalSnapshot {
    tasks: BTreeMap<BucketKey, Vec<Task>>,
    projects: Vec<Project>,
}

impl JournalSnapshot {
    /// Groups repository records by bucket, keeping repository order within
    /// each bucket.
    #[must_use]
    pub fn from_parts(records: Vec<TaskRecord>, projects: Vec<Project>) -> Self {
        let mut tasks: BTreeMap<BucketKey, Vec<Task>> = BTreeMap::new();
        for TaskRecord { bucket, task } in records {
            tasks.entry(bucket).or_default().push(task);
        }
        Self { tasks, projects }
    }

    /// Returns the full bucket map.
    #[must_use]
    pub const fn task_map(&self) -> &BTreeMap<BucketKey, Vec<Task>> {
        &self.tasks
    }

    /// Returns the entries filed under `bucket`.
    #[must_use]
    pub fn tasks_for(&self, bucket: BucketKey) -> &[Task] {
        self.tasks
            .get(&bucket)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Counts open entries in `bucket`. Done, canceled and migrated entries
    /// are not counted.
    #[must_use]
    pub fn open_task_count(&self, bucket: BucketKey) -> usize {
        self.tasks_for(bucket)
            .iter()
            .filter(|task| task.status() == TaskStatus::Open)
            .count()
    }

    /// Returns every entry tagged with `project_id`, across all buckets, in
    /// bucket order.
    #[must_use]
    pub fn tasks_for_project(&self, project_id: ProjectId) -> Vec<TaskRecord> {
        self.tasks
            .iter()
            .flat_map(|(bucket, tasks)| {
                tasks
                    .iter()
                    .filter(move |task| task.project_id() == Some(project_id))
                    .map(move |task| TaskRecord::new(*bucket, task.clone()))
            })
            .collect()
    }

    /// Returns the project list.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up a project. Returns `None` for dangling references.
    #[must_use]
    pub fn project(&self, project_id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == project_id)
    }
}

//! Repository contract tests for the in-memory journal store.

use super::helpers::{bucket, open_record, repo};
use bujo::journal::{
    adapters::memory::InMemoryJournalRepository,
    domain::{Project, ProjectName, TaskRecord, TaskStatus},
    ports::{JournalRepository, JournalRepositoryError},
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_preserves_insertion_order(
    repo: InMemoryJournalRepository,
) -> eyre::Result<()> {
    let records = vec![
        open_record("2024-01-03", "Third bucket, first insert")?,
        open_record("2024-01-01", "First bucket")?,
        open_record("2024-01-03", "Third bucket, second insert")?,
    ];
    for record in &records {
        repo.insert_task(record).await?;
    }

    ensure!(repo.list_tasks().await? == records);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_task_ids_are_rejected(repo: InMemoryJournalRepository) -> eyre::Result<()> {
    let record = open_record("2024-01-01", "Buy milk")?;
    repo.insert_task(&record).await?;

    let result = repo.insert_task(&record).await;

    ensure!(matches!(
        result,
        Err(JournalRepositoryError::DuplicateTask(id)) if id == record.task.id()
    ));
    ensure!(repo.list_tasks().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_task_fails(repo: InMemoryJournalRepository) -> eyre::Result<()> {
    let record = open_record("2024-01-01", "Never stored")?;

    let result = repo.update_task(&record).await;

    ensure!(matches!(result, Err(JournalRepositoryError::TaskNotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_reports_whether_anything_was_removed(
    repo: InMemoryJournalRepository,
) -> eyre::Result<()> {
    let record = open_record("2024-01-01", "Scratch this")?;
    repo.insert_task(&record).await?;

    ensure!(repo.delete_task(record.task.id()).await?);
    ensure!(!repo.delete_task(record.task.id()).await?);
    ensure!(repo.find_task(record.task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_migration_applies_both_writes(
    repo: InMemoryJournalRepository,
) -> eyre::Result<()> {
    let mut original = open_record("2024-01-01", "Call the bank")?;
    repo.insert_task(&original).await?;
    let continuation_task = original.task.migrate(&DefaultClock)?;
    let continuation = TaskRecord::new(bucket("2024-01-02")?, continuation_task);

    repo.record_migration(&original, &continuation).await?;

    ensure!(repo.list_tasks().await? == vec![original, continuation]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_migration_is_all_or_nothing(repo: InMemoryJournalRepository) -> eyre::Result<()> {
    let stored = open_record("2024-01-01", "Book flights")?;
    let clash = open_record("2024-01-02", "Already tomorrow")?;
    repo.insert_task(&stored).await?;
    repo.insert_task(&clash).await?;

    let mut migrated = stored.clone();
    migrated.task.migrate(&DefaultClock)?;
    let result = repo.record_migration(&migrated, &clash).await;

    ensure!(matches!(result, Err(JournalRepositoryError::DuplicateTask(_))));
    let found = repo
        .find_task(stored.task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("original should remain"))?;
    ensure!(found.task.status() == TaskStatus::Open);
    ensure!(repo.list_tasks().await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_migration_requires_a_stored_original(
    repo: InMemoryJournalRepository,
) -> eyre::Result<()> {
    let mut original = open_record("2024-01-01", "Ghost")?;
    let continuation_task = original.task.migrate(&DefaultClock)?;
    let continuation = TaskRecord::new(bucket("2024-01-08")?, continuation_task);

    let result = repo.record_migration(&original, &continuation).await;

    ensure!(matches!(result, Err(JournalRepositoryError::TaskNotFound(_))));
    ensure!(repo.list_tasks().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn projects_round_trip_and_reject_duplicates(
    repo: InMemoryJournalRepository,
) -> eyre::Result<()> {
    let project = Project::new(ProjectName::new("Garden")?, &DefaultClock);
    repo.insert_project(&project).await?;

    let duplicate = repo.insert_project(&project).await;

    ensure!(matches!(
        duplicate,
        Err(JournalRepositoryError::DuplicateProject(_))
    ));
    ensure!(repo.list_projects().await? == vec![project.clone()]);
    ensure!(repo.delete_project(project.id()).await?);
    ensure!(!repo.delete_project(project.id()).await?);
    Ok(())
}

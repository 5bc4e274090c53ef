//! Entry and project round-trips against `PostgreSQL`.

use super::helpers::{BoxError, open_record, prepared_repo};
use bujo::journal::{
    domain::{BucketKey, EntryKind, Project, ProjectName, Task, TaskContent, TaskRecord, TaskStatus},
    ports::{JournalRepository, JournalRepositoryError},
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn entries_round_trip_with_every_field() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let project = Project::new(ProjectName::new("Garden")?, &DefaultClock);
    prepared.repo.insert_project(&project).await?;
    let display_date = NaiveDate::from_ymd_opt(2024, 3, 20);
    let task = Task::new(TaskContent::new("Plant tulips")?, EntryKind::Event, &DefaultClock)
        .with_project(Some(project.id()))
        .with_display_date(display_date);
    let record = TaskRecord::new(BucketKey::parse("2024-03-01")?, task);

    prepared.repo.insert_task(&record).await?;
    let found = prepared
        .repo
        .find_task(record.task.id())
        .await?
        .ok_or("inserted entry should be found")?;

    assert_eq!(found.bucket, record.bucket);
    assert_eq!(found.task.id(), record.task.id());
    assert_eq!(found.task.content(), record.task.content());
    assert_eq!(found.task.kind(), EntryKind::Event);
    assert_eq!(found.task.project_id(), Some(project.id()));
    assert_eq!(found.task.display_date(), display_date);
    assert_eq!(prepared.repo.list_projects().await?.len(), 1);
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_ids_are_reported() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let record = open_record("2024-01-01", "Buy milk")?;
    prepared.repo.insert_task(&record).await?;

    let result = prepared.repo.insert_task(&record).await;

    assert!(matches!(
        result,
        Err(JournalRepositoryError::DuplicateTask(id)) if id == record.task.id()
    ));
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn status_updates_persist() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let mut record = open_record("2024-01-01", "Pay rent")?;
    prepared.repo.insert_task(&record).await?;

    record.task.toggle_done(&DefaultClock)?;
    prepared.repo.update_task(&record).await?;

    let found = prepared
        .repo
        .find_task(record.task.id())
        .await?
        .ok_or("updated entry should be found")?;
    assert_eq!(found.task.status(), TaskStatus::Done);
    assert_eq!(found.bucket, record.bucket);
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_entry_fails() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let record = open_record("2024-01-01", "Never stored")?;

    let result = prepared.repo.update_task(&record).await;

    assert!(matches!(result, Err(JournalRepositoryError::TaskNotFound(_))));
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_keeps_tagged_entries() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let project = Project::new(ProjectName::new("Kitchen")?, &DefaultClock);
    prepared.repo.insert_project(&project).await?;
    let task = Task::new(TaskContent::new("Fix the tap")?, EntryKind::Task, &DefaultClock)
        .with_project(Some(project.id()));
    let record = TaskRecord::new(BucketKey::parse("2024-01-01")?, task);
    prepared.repo.insert_task(&record).await?;

    assert!(prepared.repo.delete_project(project.id()).await?);
    assert!(!prepared.repo.delete_project(project.id()).await?);

    let listed = prepared.repo.list_tasks().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed.first().and_then(|stored| stored.task.project_id()),
        Some(project.id())
    );
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_entry_twice_is_harmless() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let record = open_record("2024-01-01", "Scratch this")?;
    prepared.repo.insert_task(&record).await?;

    assert!(prepared.repo.delete_task(record.task.id()).await?);
    assert!(!prepared.repo.delete_task(record.task.id()).await?);
    Ok(())
}

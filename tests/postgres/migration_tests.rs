//! Transactional migration writes against `PostgreSQL`.

use super::helpers::{BoxError, open_record, prepared_repo};
use bujo::journal::{
    domain::{BucketKey, TaskRecord, TaskStatus},
    ports::{JournalRepository, JournalRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn migration_updates_and_inserts_together() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let mut original = open_record("2024-01-07", "Plan sprint")?;
    prepared.repo.insert_task(&original).await?;
    let continuation = TaskRecord::new(
        BucketKey::parse("2024-01-08")?,
        original.task.migrate(&DefaultClock)?,
    );

    prepared
        .repo
        .record_migration(&original, &continuation)
        .await?;

    let stored_original = prepared
        .repo
        .find_task(original.task.id())
        .await?
        .ok_or("original should remain")?;
    let stored_continuation = prepared
        .repo
        .find_task(continuation.task.id())
        .await?
        .ok_or("continuation should be stored")?;
    assert_eq!(stored_original.task.status(), TaskStatus::Migrated);
    assert_eq!(stored_original.bucket, original.bucket);
    assert_eq!(stored_continuation.task.status(), TaskStatus::Open);
    assert_eq!(stored_continuation.bucket, continuation.bucket);
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn failed_insert_rolls_back_the_status_change() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let stored = open_record("2024-01-01", "Book flights")?;
    let clash = open_record("2024-01-02", "Already tomorrow")?;
    prepared.repo.insert_task(&stored).await?;
    prepared.repo.insert_task(&clash).await?;

    let mut migrated = stored.clone();
    migrated.task.migrate(&DefaultClock)?;
    let result = prepared.repo.record_migration(&migrated, &clash).await;

    assert!(matches!(result, Err(JournalRepositoryError::DuplicateTask(_))));
    let found = prepared
        .repo
        .find_task(stored.task.id())
        .await?
        .ok_or("original should remain")?;
    assert_eq!(found.task.status(), TaskStatus::Open);
    Ok(())
}

#[rstest]
#[ignore = "requires BUJO_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn missing_original_inserts_nothing() -> Result<(), BoxError> {
    let prepared = prepared_repo()?;
    let mut original = open_record("2024-01-01", "Ghost")?;
    let continuation = TaskRecord::new(
        BucketKey::parse("2024-01-02")?,
        original.task.migrate(&DefaultClock)?,
    );

    let result = prepared.repo.record_migration(&original, &continuation).await;

    assert!(matches!(result, Err(JournalRepositoryError::TaskNotFound(_))));
    assert!(prepared.repo.list_tasks().await?.is_empty());
    Ok(())
}

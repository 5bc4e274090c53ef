//! In-memory integration tests for the journal session.

use std::sync::Arc;

use super::helpers::bucket;
use bujo::journal::{
    adapters::memory::InMemoryJournalRepository,
    domain::{BucketKey, EntryKind, LogView, MigrationTarget, Task, TaskStatus},
    services::{AddTaskRequest, JournalService, JournalSession, Outcome},
};
use chrono::{NaiveDate, TimeDelta};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestSession = JournalSession<InMemoryJournalRepository, DefaultClock>;

#[fixture]
fn session() -> TestSession {
    JournalSession::new(
        JournalService::new(
            Arc::new(InMemoryJournalRepository::new()),
            Arc::new(DefaultClock),
        ),
        TimeDelta::seconds(5),
    )
}

fn statuses(session: &TestSession, key: BucketKey) -> Vec<TaskStatus> {
    session.tasks_for(key).iter().map(Task::status).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn weekly_entries_migrate_to_the_following_week(session: TestSession) -> eyre::Result<()> {
    let wednesday = NaiveDate::from_ymd_opt(2024, 1, 10).ok_or_else(|| eyre::eyre!("bad date"))?;
    let week = LogView::Weekly
        .bucket_for(wednesday)
        .ok_or_else(|| eyre::eyre!("weekly view has a bucket"))?;
    ensure!(week == bucket("2024-01-08")?);

    ensure!(
        session
            .add_task(AddTaskRequest::new(week, "Plan sprint", EntryKind::Task))
            .await
            == Outcome::Applied
    );
    let id = session
        .tasks_for(week)
        .first()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("task should be listed"))?;

    ensure!(
        session
            .migrate_task(week, id, MigrationTarget::NextWeek)
            .await
            == Outcome::Applied
    );

    ensure!(statuses(&session, week) == [TaskStatus::Migrated]);
    ensure!(statuses(&session, bucket("2024-01-15")?) == [TaskStatus::Open]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn monthly_entries_land_on_day_one(session: TestSession) -> eyre::Result<()> {
    let month = bucket("2024-01-01")?.month_anchor();
    session
        .add_task(AddTaskRequest::new(month, "Quarterly taxes", EntryKind::Task))
        .await;
    let id = session
        .tasks_for(month)
        .first()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("task should be listed"))?;

    ensure!(
        session
            .migrate_task(month, id, MigrationTarget::NextMonth)
            .await
            == Outcome::Applied
    );

    ensure!(statuses(&session, bucket("2024-02-01")?) == [TaskStatus::Open]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_chain_of_migrations_keeps_every_hop(session: TestSession) -> eyre::Result<()> {
    let mut current = bucket("2024-01-30")?;
    session
        .add_task(AddTaskRequest::new(current, "Renew insurance", EntryKind::Task))
        .await;

    for _ in 0..3 {
        let id = session
            .tasks_for(current)
            .iter()
            .find(|task| task.status() == TaskStatus::Open)
            .map(Task::id)
            .ok_or_else(|| eyre::eyre!("open task expected in {current}"))?;
        ensure!(
            session
                .migrate_task(current, id, MigrationTarget::Tomorrow)
                .await
                == Outcome::Applied
        );
        current = MigrationTarget::Tomorrow.target_bucket(current)?;
    }

    ensure!(current == bucket("2024-02-02")?);
    let total: usize = session.task_map().values().map(Vec::len).sum();
    ensure!(total == 4);
    ensure!(session.open_task_count(current) == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn notes_and_events_share_the_state_machine(session: TestSession) -> eyre::Result<()> {
    let day = bucket("2024-05-04")?;
    session
        .add_task(AddTaskRequest::new(day, "Team lunch", EntryKind::Event))
        .await;
    session
        .add_task(AddTaskRequest::new(day, "Idea: shorter standups", EntryKind::Note))
        .await;

    let ids: Vec<_> = session.tasks_for(day).iter().map(Task::id).collect();
    for id in &ids {
        ensure!(session.cancel_task(day, *id).await == Outcome::Applied);
    }

    ensure!(statuses(&session, day) == [TaskStatus::Canceled, TaskStatus::Canceled]);
    ensure!(session.open_task_count(day) == 0);
    Ok(())
}

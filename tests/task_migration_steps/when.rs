//! When steps for journal migration BDD scenarios.

use super::world::{MigrationWorld, run_async};
use bujo::journal::domain::MigrationTarget;
use rstest_bdd_macros::when;

#[when(r#"the task is migrated to "{target}""#)]
fn migrate_task(world: &mut MigrationWorld, target: String) -> Result<(), eyre::Report> {
    let migration_target = MigrationTarget::try_from(target.as_str())?;
    let (bucket, id) = world.logged()?;
    let outcome = run_async(world.session()?.migrate_task(bucket, id, migration_target));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when("the task is toggled done")]
fn toggle_task(world: &mut MigrationWorld) -> Result<(), eyre::Report> {
    let (bucket, id) = world.logged()?;
    let outcome = run_async(world.session()?.toggle_done(bucket, id));
    world.last_outcome = Some(outcome);
    Ok(())
}

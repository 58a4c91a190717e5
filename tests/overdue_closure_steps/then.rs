//! Then steps for overdue closure BDD scenarios.

use super::world::{OverdueWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::tracker::domain::Task;

fn reload_task(world: &OverdueWorld) -> Result<Task, eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    run_async(world.tasks.get_task(task.id())).map_err(|err| eyre::eyre!("reload task: {err}"))
}

#[then("the sweep reports {count:usize} closed tasks")]
fn sweep_reports(world: &OverdueWorld, count: usize) -> Result<(), eyre::Report> {
    let result = world
        .last_sweep
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing sweep result"))?;
    match result {
        Ok(closed) if *closed == count => Ok(()),
        other => Err(eyre::eyre!("expected {count} closed tasks, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &OverdueWorld, status: String) -> Result<(), eyre::Report> {
    let task = reload_task(world)?;
    if task.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the task has a closing timestamp")]
fn task_has_closing_timestamp(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let task = reload_task(world)?;
    match task.closed_at() {
        Some(closed_at) if closed_at == task.updated_at() => Ok(()),
        other => Err(eyre::eyre!("expected closed_at to match updated_at, got {other:?}")),
    }
}

#[then("the task has no closing timestamp")]
fn task_has_no_closing_timestamp(world: &OverdueWorld) -> Result<(), eyre::Report> {
    let task = reload_task(world)?;
    if let Some(closed_at) = task.closed_at() {
        return Err(eyre::eyre!("expected no closed_at, found {closed_at}"));
    }
    Ok(())
}

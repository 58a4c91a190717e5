//! Given steps for overdue closure BDD scenarios.

use super::world::{OverdueWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::tracker::services::{CreateProjectRequest, CreateTaskRequest};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut OverdueWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .projects
            .create_project(CreateProjectRequest::new(name)),
    )
    .wrap_err("create project for overdue scenario")?;
    world.project = Some(project.id());
    Ok(())
}

fn create_task(
    world: &mut OverdueWorld,
    title: String,
    status: String,
    deadline: Option<String>,
) -> Result<(), eyre::Report> {
    let project = world
        .project
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let mut request = CreateTaskRequest::new(project, title).with_status(status);
    if let Some(date) = deadline {
        request = request.with_deadline(date);
    }
    let task = run_async(world.tasks.create_task(request))
        .wrap_err("create task for overdue scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"a task "{title}" with status "{status}" due "{deadline}""#)]
fn task_with_deadline(
    world: &mut OverdueWorld,
    title: String,
    status: String,
    deadline: String,
) -> Result<(), eyre::Report> {
    create_task(world, title, status, Some(deadline))
}

#[given(r#"a task "{title}" with status "{status}" and no deadline"#)]
fn task_without_deadline(
    world: &mut OverdueWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    create_task(world, title, status, None)
}

#[given("the overdue sweep has already run")]
fn sweep_has_run(world: &mut OverdueWorld) -> Result<(), eyre::Report> {
    run_async(world.tasks.close_overdue_tasks()).wrap_err("initial overdue sweep")?;
    Ok(())
}

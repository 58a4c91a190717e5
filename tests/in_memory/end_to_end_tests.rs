//! End-to-end workflows through the project and task services.

use super::helpers::{Services, services};
use rstest::rstest;
use taskboard::tracker::services::{
    CreateProjectRequest, CreateTaskRequest, NotFoundError, TrackerError, UpdateProjectRequest,
    UpdateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn future_deadline_survives_until_moved_into_the_past(
    services: Services,
) -> Result<(), eyre::Report> {
    let project = services
        .projects
        .create_project(CreateProjectRequest::new("Alpha"))
        .await?;
    let task = services
        .tasks
        .create_task(CreateTaskRequest::new(project.id(), "Write plan").with_deadline("2099-01-01"))
        .await?;

    eyre::ensure!(services.tasks.close_overdue_tasks().await? == 0);

    services
        .tasks
        .update_task(task.id(), UpdateTaskRequest::new().with_deadline("2000-01-01"))
        .await?;
    eyre::ensure!(services.tasks.close_overdue_tasks().await? == 1);

    let closed = services.tasks.get_task(task.id()).await?;
    eyre::ensure!(closed.status().as_str() == "done", "task should be done");
    eyre::ensure!(closed.closed_at().is_some(), "closed_at should be set");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_lifecycle_with_tasks(services: Services) -> Result<(), eyre::Report> {
    let project = services
        .projects
        .create_project(CreateProjectRequest::new("Roadmap").with_description("Q3 plan"))
        .await?;
    let renamed = services
        .projects
        .update_project(project.id(), UpdateProjectRequest::new().with_name("Roadmap 2"))
        .await?;
    eyre::ensure!(renamed.name().as_str() == "Roadmap 2");

    let first = services
        .tasks
        .create_task(CreateTaskRequest::new(project.id(), "Draft"))
        .await?;
    let second = services
        .tasks
        .create_task(CreateTaskRequest::new(project.id(), "Review").with_status("doing"))
        .await?;

    let (overview, tasks) = services.tasks.project_overview(project.id()).await?;
    eyre::ensure!(overview.name().as_str() == "Roadmap 2");
    eyre::ensure!(tasks == vec![first.clone(), second.clone()]);

    services.projects.delete_project(project.id()).await?;

    for id in [first.id(), second.id()] {
        let result = services.tasks.get_task(id).await;
        eyre::ensure!(
            matches!(result, Err(TrackerError::NotFound(NotFoundError::Task(_)))),
            "task should be gone after cascade, got {result:?}"
        );
    }
    eyre::ensure!(services.projects.list_projects().await?.is_empty());
    eyre::ensure!(services.tasks.list_all_tasks().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_project_name_can_be_reused(services: Services) -> Result<(), eyre::Report> {
    let first = services
        .projects
        .create_project(CreateProjectRequest::new("Alpha"))
        .await?;
    services.projects.delete_project(first.id()).await?;

    let second = services
        .projects
        .create_project(CreateProjectRequest::new("Alpha"))
        .await?;
    eyre::ensure!(second.id() != first.id());
    Ok(())
}

//! Store-level contracts of the in-memory tracker store.

use super::helpers::store;
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{
        Deadline, Description, Project, ProjectId, ProjectName, StatusSet, Task, TaskDraft,
        TaskTitle, TrackerLimits,
    },
    ports::{ProjectRepository, RepositoryError, TaskRepository},
};

fn project(name: &str) -> Project {
    let limits = TrackerLimits::default();
    Project::new(
        ProjectName::new(name, &limits).expect("valid name"),
        Description::default(),
        &DefaultClock,
    )
}

fn task(project_id: ProjectId, status: &str, deadline: Option<&str>) -> Task {
    let limits = TrackerLimits::default();
    Task::new(
        TaskDraft {
            project_id,
            title: TaskTitle::new("Stored", &limits).expect("valid title"),
            description: Description::default(),
            status: StatusSet::default().parse(status).expect("valid status"),
            deadline: deadline.map(|text| Deadline::parse(text).expect("valid deadline")),
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascade_removes_only_owned_tasks(
    store: InMemoryTrackerStore,
) -> Result<(), eyre::Report> {
    let doomed = project("Doomed");
    let kept = project("Kept");
    store.insert_project(&doomed).await?;
    store.insert_project(&kept).await?;
    for owner in [doomed.id(), doomed.id(), kept.id()] {
        store.insert_task(&task(owner, "todo", None)).await?;
    }

    let removed = store.delete_project_cascade(doomed.id()).await?;

    eyre::ensure!(removed == 2, "expected 2 removed tasks, got {removed}");
    eyre::ensure!(store.find_project(doomed.id()).await?.is_none());
    eyre::ensure!(store.count_tasks().await? == 1);
    eyre::ensure!(store.list_tasks_by_project(kept.id()).await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cascade_on_missing_project_fails(store: InMemoryTrackerStore) {
    let missing = ProjectId::new();

    let result = store.delete_project_cascade(missing).await;

    assert!(matches!(result, Err(RepositoryError::ProjectNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_insert_requires_owning_project(store: InMemoryTrackerStore) {
    let orphan = task(ProjectId::new(), "todo", None);

    let result = store.insert_task(&orphan).await;

    assert!(matches!(result, Err(RepositoryError::MissingProject(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_name_is_rejected_by_store(
    store: InMemoryTrackerStore,
) -> Result<(), eyre::Report> {
    store.insert_project(&project("Alpha")).await?;

    let result = store.insert_project(&project("Alpha")).await;

    eyre::ensure!(
        matches!(result, Err(RepositoryError::DuplicateProjectName(_))),
        "expected DuplicateProjectName, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_update_is_all_or_nothing(store: InMemoryTrackerStore) -> Result<(), eyre::Report> {
    let owner = project("Batch");
    store.insert_project(&owner).await?;
    let mut stored = task(owner.id(), "todo", Some("2020-01-01"));
    store.insert_task(&stored).await?;
    let mut unknown = task(owner.id(), "todo", None);

    stored.close(&DefaultClock);
    unknown.close(&DefaultClock);
    let result = store.update_tasks(&[stored.clone(), unknown]).await;

    eyre::ensure!(
        matches!(result, Err(RepositoryError::TaskNotFound(_))),
        "expected TaskNotFound, got {result:?}"
    );
    let reloaded = store
        .find_task(stored.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should still exist"))?;
    eyre::ensure!(reloaded.status().as_str() == "todo", "batch must not apply partially");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_query_excludes_done_undated_and_current(
    store: InMemoryTrackerStore,
) -> Result<(), eyre::Report> {
    let owner = project("Overdue");
    store.insert_project(&owner).await?;
    let late = task(owner.id(), "doing", Some("2024-06-14"));
    for candidate in [
        late.clone(),
        task(owner.id(), "done", Some("2024-06-01")),
        task(owner.id(), "todo", None),
        task(owner.id(), "todo", Some("2024-06-15")),
    ] {
        store.insert_task(&candidate).await?;
    }
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).ok_or_else(|| eyre::eyre!("bad date"))?;

    let overdue = store.find_overdue_tasks(today).await?;

    eyre::ensure!(overdue == vec![late], "unexpected overdue set: {overdue:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capacity_checked_inserts_stop_at_the_limit(
    store: InMemoryTrackerStore,
) -> Result<(), eyre::Report> {
    let owner = project("Owner");
    store.insert_project_within(&owner, 1).await?;

    let refused = store.insert_project_within(&project("Second"), 1).await;
    eyre::ensure!(
        matches!(refused, Err(RepositoryError::ProjectLimitReached { max: 1 })),
        "expected ProjectLimitReached, got {refused:?}"
    );
    eyre::ensure!(store.count_projects().await? == 1);

    store.insert_task_within(&task(owner.id(), "todo", None), 2).await?;
    store.insert_task_within(&task(owner.id(), "todo", None), 2).await?;
    let refused_task = store
        .insert_task_within(&task(owner.id(), "todo", None), 2)
        .await;
    eyre::ensure!(
        matches!(refused_task, Err(RepositoryError::TaskLimitReached { max: 2 })),
        "expected TaskLimitReached, got {refused_task:?}"
    );
    eyre::ensure!(store.count_tasks().await? == 2);
    Ok(())
}

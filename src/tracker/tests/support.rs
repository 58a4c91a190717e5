//! Shared fixtures for tracker unit tests.

use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::tracker::{
    adapters::memory::InMemoryTrackerStore,
    domain::{ProjectId, Task, TaskId, TrackerLimits},
    ports::{RepositoryResult, TaskRepository},
    services::{CreateProjectRequest, ProjectService, TaskService},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::DefaultClock;
use mockall::mock;
use rstest::fixture;

pub type TestProjectService = ProjectService<InMemoryTrackerStore, DefaultClock>;
pub type TestTaskService = TaskService<InMemoryTrackerStore, InMemoryTrackerStore, DefaultClock>;

/// Both services wired to one in-memory store.
pub struct Tracker {
    pub projects: TestProjectService,
    pub tasks: TestTaskService,
}

impl Tracker {
    /// Creates a project and returns its identifier.
    pub async fn project(&self, name: &str) -> ProjectId {
        self.projects
            .create_project(CreateProjectRequest::new(name))
            .await
            .expect("project creation should succeed")
            .id()
    }
}

pub fn tracker_with(config: TrackerConfig) -> Tracker {
    let store = Arc::new(InMemoryTrackerStore::new());
    let clock = Arc::new(DefaultClock);
    let shared = Arc::new(config);
    Tracker {
        projects: ProjectService::new(Arc::clone(&store), Arc::clone(&clock), Arc::clone(&shared)),
        tasks: TaskService::new(Arc::clone(&store), store, clock, shared),
    }
}

pub fn limited(max_projects: usize, max_tasks: usize) -> TrackerConfig {
    TrackerConfig {
        limits: TrackerLimits {
            max_projects,
            max_tasks,
            ..TrackerLimits::default()
        },
        ..TrackerConfig::default()
    }
}

#[fixture]
pub fn tracker() -> Tracker {
    tracker_with(TrackerConfig::default())
}

// Task store double for asserting which store calls a service makes.
mock! {
    pub Tasks {}

    #[async_trait]
    impl TaskRepository for Tasks {
        async fn insert_task(&self, task: &Task) -> RepositoryResult<()>;
        async fn insert_task_within(&self, task: &Task, max_tasks: usize) -> RepositoryResult<()>;
        async fn update_task(&self, task: &Task) -> RepositoryResult<()>;
        async fn update_tasks(&self, tasks: &[Task]) -> RepositoryResult<()>;
        async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>>;
        async fn list_tasks(&self) -> RepositoryResult<Vec<Task>>;
        async fn list_tasks_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Task>>;
        async fn count_tasks(&self) -> RepositoryResult<usize>;
        async fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
        async fn find_overdue_tasks(&self, today: NaiveDate) -> RepositoryResult<Vec<Task>>;
    }
}

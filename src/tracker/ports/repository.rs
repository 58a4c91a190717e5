//! Repository ports for project and task persistence.
//!
//! Stores own persistence mechanics only. Business validation (lengths,
//! capacity, status membership) happens in the services before a store is
//! called, and stores must not reject or coerce data on those grounds.

use crate::tracker::domain::{Project, ProjectId, ProjectName, Task, TaskId};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateProject`] when the identifier is
    /// taken or [`RepositoryError::DuplicateProjectName`] when the name is.
    async fn insert_project(&self, project: &Project) -> RepositoryResult<()>;

    /// Stores a new project only while fewer than `max_projects` exist. The
    /// count and the insert happen in one store operation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectLimitReached`] at capacity, otherwise
    /// the same errors as [`ProjectRepository::insert_project`].
    async fn insert_project_within(
        &self,
        project: &Project,
        max_projects: usize,
    ) -> RepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`] when the project does not
    /// exist or [`RepositoryError::DuplicateProjectName`] when another project
    /// holds the new name.
    async fn update_project(&self, project: &Project) -> RepositoryResult<()>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> RepositoryResult<Option<Project>>;

    /// Finds a project by exact, case-sensitive name.
    async fn find_project_by_name(&self, name: &ProjectName)
    -> RepositoryResult<Option<Project>>;

    /// Returns all projects in creation order.
    async fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// Returns the number of live projects.
    async fn count_projects(&self) -> RepositoryResult<usize>;

    /// Deletes a project together with every task it owns, atomically.
    ///
    /// Returns the number of tasks removed.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ProjectNotFound`] when the project does not
    /// exist.
    async fn delete_project_cascade(&self, id: ProjectId) -> RepositoryResult<usize>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::MissingProject`] when the owning project
    /// does not exist or [`RepositoryError::DuplicateTask`] when the
    /// identifier is taken.
    async fn insert_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Stores a new task only while fewer than `max_tasks` exist across all
    /// projects. The count and the insert happen in one store operation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskLimitReached`] at capacity, otherwise
    /// the same errors as [`TaskRepository::insert_task`].
    async fn insert_task_within(&self, task: &Task, max_tasks: usize) -> RepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> RepositoryResult<()>;

    /// Persists changes to several tasks as one logical operation: either
    /// every task is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] for the first task that does
    /// not exist.
    async fn update_tasks(&self, tasks: &[Task]) -> RepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> RepositoryResult<Option<Task>>;

    /// Returns every task across all projects in creation order.
    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>>;

    /// Returns the tasks of one project in creation order.
    async fn list_tasks_by_project(&self, project_id: ProjectId) -> RepositoryResult<Vec<Task>>;

    /// Returns the number of live tasks across all projects.
    async fn count_tasks(&self) -> RepositoryResult<usize>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::TaskNotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;

    /// Returns tasks whose deadline is strictly before `today` and whose
    /// status is not terminal.
    async fn find_overdue_tasks(&self, today: NaiveDate) -> RepositoryResult<Vec<Task>>;
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A project with the same name already exists.
    #[error("duplicate project name: {0}")]
    DuplicateProjectName(ProjectName),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task references a project that does not exist.
    #[error("task references missing project: {0}")]
    MissingProject(ProjectId),

    /// The store already holds the maximum number of projects.
    #[error("project limit of {max} reached")]
    ProjectLimitReached {
        /// Configured maximum.
        max: usize,
    },

    /// The store already holds the maximum number of tasks.
    #[error("task limit of {max} reached")]
    TaskLimitReached {
        /// Configured maximum.
        max: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

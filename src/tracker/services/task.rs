//! Service enforcing task field rules, capacity, and overdue closure.

use crate::config::TrackerConfig;
use crate::tracker::{
    domain::{
        Deadline, Description, Project, ProjectId, Task, TaskChanges, TaskDraft, TaskId,
        TaskTitle, ValidationError,
    },
    ports::{ProjectRepository, TaskRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{NotFoundError, TrackerError, TrackerResult};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: String,
    status: Option<String>,
    deadline: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the default status and no deadline.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: String::new(),
            status: None,
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the deadline as `YYYY-MM-DD` text. Blank text means no deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for updating a task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    deadline: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the deadline with `YYYY-MM-DD` text; an empty string clears
    /// it.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Clears the deadline.
    #[must_use]
    pub fn clear_deadline(self) -> Self {
        self.with_deadline("")
    }
}

/// Task orchestration service.
pub struct TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    config: Arc<TrackerConfig>,
}

impl<P, T, C> Clone for TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<P, T, C> TaskService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        tasks: Arc<T>,
        clock: Arc<C>,
        config: Arc<TrackerConfig>,
    ) -> Self {
        Self {
            projects,
            tasks,
            clock,
            config,
        }
    }

    async fn require_project(&self, id: ProjectId) -> TrackerResult<Project> {
        self.projects
            .find_project(id)
            .await?
            .ok_or(TrackerError::NotFound(NotFoundError::Project(id)))
    }

    /// Creates a task under an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the project does not exist, and
    /// [`TrackerError::Validation`] when the title or description breaks a
    /// length rule, the status is not allowed, the task limit across all
    /// projects has been reached, or the deadline is not a `YYYY-MM-DD` date.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TrackerResult<Task> {
        let project = self.require_project(request.project_id).await?;
        let limits = &self.config.limits;
        let statuses = &self.config.statuses;

        let title = TaskTitle::new(&request.title, limits)?;
        let description = Description::new(&request.description, limits)?;
        let status = match request.status {
            Some(raw) => statuses.parse(&raw)?,
            None => statuses.default_status(),
        };
        if self.tasks.count_tasks().await? >= limits.max_tasks {
            return Err(ValidationError::TaskLimitReached {
                max: limits.max_tasks,
            }
            .into());
        }
        let deadline = request
            .deadline
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(Deadline::parse)
            .transpose()?;

        let draft = TaskDraft {
            project_id: project.id(),
            title,
            description,
            status,
            deadline,
        };
        let task = Task::new(draft, &*self.clock);
        self.tasks.insert_task_within(&task, limits.max_tasks).await?;
        info!(task_id = %task.id(), project_id = %project.id(), "task created");
        Ok(task)
    }

    /// Returns the task with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when no such task exists.
    pub async fn get_task(&self, id: TaskId) -> TrackerResult<Task> {
        debug!(task_id = %id, "loading task");
        self.tasks
            .find_task(id)
            .await?
            .ok_or(TrackerError::NotFound(NotFoundError::Task(id)))
    }

    /// Updates any of a task's title, description, status, and deadline.
    ///
    /// Every supplied field is validated before any is applied, so a failure
    /// leaves the task untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the task does not exist and
    /// [`TrackerError::Validation`] when any supplied field breaks a rule.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TrackerResult<Task> {
        let mut task = self.get_task(id).await?;
        let changes = self.stage_changes(request)?;

        task.apply(changes, &*self.clock);
        self.tasks.update_task(&task).await?;
        info!(task_id = %id, status = %task.status(), "task updated");
        Ok(task)
    }

    /// Changes only the status of a task.
    ///
    /// # Errors
    ///
    /// See [`TaskService::update_task`].
    pub async fn change_status(&self, id: TaskId, status: &str) -> TrackerResult<Task> {
        self.update_task(id, UpdateTaskRequest::new().with_status(status))
            .await
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the task does not exist.
    pub async fn delete_task(&self, id: TaskId) -> TrackerResult<()> {
        let task = self.get_task(id).await?;
        self.tasks.delete_task(task.id()).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns the tasks of one project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the project does not exist,
    /// rather than an empty list.
    pub async fn list_tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> TrackerResult<Vec<Task>> {
        let project = self.require_project(project_id).await?;
        Ok(self.tasks.list_tasks_by_project(project.id()).await?)
    }

    /// Returns every task across all projects in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Repository`] when the store fails.
    pub async fn list_all_tasks(&self) -> TrackerResult<Vec<Task>> {
        Ok(self.tasks.list_tasks().await?)
    }

    /// Returns a project together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the project does not exist.
    pub async fn project_overview(
        &self,
        project_id: ProjectId,
    ) -> TrackerResult<(Project, Vec<Task>)> {
        let project = self.require_project(project_id).await?;
        let tasks = self.tasks.list_tasks_by_project(project.id()).await?;
        Ok((project, tasks))
    }

    /// Closes every overdue task and returns how many were closed.
    ///
    /// A task is overdue when its deadline is strictly before the current UTC
    /// date and its status is not terminal. Each closed task moves to the
    /// terminal status with `closed_at` set; all of them are persisted in one
    /// batched store operation.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Repository`] when the store fails; in that case
    /// no task is closed.
    pub async fn close_overdue_tasks(&self) -> TrackerResult<usize> {
        let today = self.clock.utc().date_naive();
        let candidates = self.tasks.find_overdue_tasks(today).await?;

        let mut closed = Vec::with_capacity(candidates.len());
        for mut task in candidates {
            if task.is_overdue(today) && task.close(&*self.clock) {
                closed.push(task);
            }
        }
        if closed.is_empty() {
            debug!(%today, "no overdue tasks");
            return Ok(0);
        }

        self.tasks.update_tasks(&closed).await?;
        info!(closed = closed.len(), %today, "closed overdue tasks");
        Ok(closed.len())
    }

    fn stage_changes(&self, request: UpdateTaskRequest) -> TrackerResult<TaskChanges> {
        let limits = &self.config.limits;
        let deadline = match request.deadline {
            Some(text) if text.trim().is_empty() => Some(None),
            Some(text) => Some(Some(Deadline::parse(&text)?)),
            None => None,
        };

        Ok(TaskChanges {
            title: request
                .title
                .map(|raw| TaskTitle::new(&raw, limits))
                .transpose()?,
            description: request
                .description
                .map(|raw| Description::new(&raw, limits))
                .transpose()?,
            status: request
                .status
                .map(|raw| self.config.statuses.parse(&raw))
                .transpose()?,
            deadline,
        })
    }
}

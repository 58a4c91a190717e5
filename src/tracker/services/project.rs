//! Service enforcing project naming, uniqueness, and capacity rules.

use crate::config::TrackerConfig;
use crate::tracker::{
    domain::{Description, Project, ProjectChanges, ProjectId, ProjectName, ValidationError},
    ports::ProjectRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

use super::{NotFoundError, TrackerError, TrackerResult};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
}

impl CreateProjectRequest {
    /// Creates a request with an empty description.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for updating a project. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project. A blank name is ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description; an empty string clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Project orchestration service.
pub struct ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    clock: Arc<C>,
    config: Arc<TrackerConfig>,
}

impl<P, C> Clone for ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<P, C> ProjectService<P, C>
where
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, clock: Arc<C>, config: Arc<TrackerConfig>) -> Self {
        Self {
            projects,
            clock,
            config,
        }
    }

    /// Creates a new, empty project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Validation`] when the trimmed name is empty,
    /// too long, or already taken, when the description is too long, or when
    /// the project limit has been reached.
    pub async fn create_project(&self, request: CreateProjectRequest) -> TrackerResult<Project> {
        let limits = &self.config.limits;
        let name = ProjectName::new(&request.name, limits)?;
        let description = Description::new(&request.description, limits)?;

        if self.projects.find_project_by_name(&name).await?.is_some() {
            return Err(ValidationError::DuplicateProjectName(name.to_string()).into());
        }
        if self.projects.count_projects().await? >= limits.max_projects {
            return Err(ValidationError::ProjectLimitReached {
                max: limits.max_projects,
            }
            .into());
        }

        let project = Project::new(name, description, &*self.clock);
        self.projects.insert_project_within(&project, limits.max_projects).await?;
        info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Returns the project with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when no such project exists.
    pub async fn get_project(&self, id: ProjectId) -> TrackerResult<Project> {
        debug!(project_id = %id, "loading project");
        self.projects
            .find_project(id)
            .await?
            .ok_or(TrackerError::NotFound(NotFoundError::Project(id)))
    }

    /// Renames and/or re-describes a project, refreshing `updated_at`.
    ///
    /// All supplied fields are validated before any is applied.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the project does not exist and
    /// [`TrackerError::Validation`] when a field breaks a rule or the new name
    /// belongs to another project.
    pub async fn update_project(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> TrackerResult<Project> {
        let mut project = self.get_project(id).await?;
        let changes = self.stage_changes(&project, request).await?;

        project.apply(changes, &*self.clock);
        self.projects.update_project(&project).await?;
        info!(project_id = %id, name = %project.name(), "project updated");
        Ok(project)
    }

    /// Deletes a project and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the project does not exist.
    pub async fn delete_project(&self, id: ProjectId) -> TrackerResult<()> {
        let project = self.get_project(id).await?;
        let removed_tasks = self.projects.delete_project_cascade(project.id()).await?;
        info!(project_id = %id, removed_tasks, "project deleted");
        Ok(())
    }

    /// Returns every project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Repository`] when the store fails.
    pub async fn list_projects(&self) -> TrackerResult<Vec<Project>> {
        Ok(self.projects.list_projects().await?)
    }

    async fn stage_changes(
        &self,
        project: &Project,
        request: UpdateProjectRequest,
    ) -> TrackerResult<ProjectChanges> {
        let limits = &self.config.limits;
        let mut changes = ProjectChanges::default();

        if let Some(raw) = request.name.filter(|raw| !raw.trim().is_empty()) {
            let name = ProjectName::new(&raw, limits)?;
            if name != *project.name() {
                let holder = self.projects.find_project_by_name(&name).await?;
                if holder.is_some_and(|other| other.id() != project.id()) {
                    return Err(ValidationError::DuplicateProjectName(name.to_string()).into());
                }
            }
            changes.name = Some(name);
        }
        if let Some(raw) = request.description {
            changes.description = Some(Description::new(&raw, limits)?);
        }
        Ok(changes)
    }
}

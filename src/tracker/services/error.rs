//! Caller-facing error taxonomy for tracker services.

use crate::tracker::{
    domain::{ProjectId, TaskId, ValidationError},
    ports::RepositoryError,
};
use thiserror::Error;

/// A referenced project or task does not exist.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum NotFoundError {
    /// No project has this identifier.
    #[error("project not found: {0}")]
    Project(ProjectId),

    /// No task has this identifier.
    #[error("task not found: {0}")]
    Task(TaskId),
}

/// Errors returned by tracker service operations.
///
/// [`TrackerError::Validation`] and [`TrackerError::NotFound`] are the two
/// recoverable kinds a caller reacts to. [`TrackerError::Repository`] carries
/// opaque infrastructure failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Input violated a business rule; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist; nothing was changed.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed.
    #[error(transparent)]
    Repository(RepositoryError),
}

/// Result type for tracker service operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

impl From<RepositoryError> for TrackerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateProjectName(name) => {
                Self::Validation(ValidationError::DuplicateProjectName(name.to_string()))
            }
            RepositoryError::ProjectNotFound(id) | RepositoryError::MissingProject(id) => {
                Self::NotFound(NotFoundError::Project(id))
            }
            RepositoryError::TaskNotFound(id) => Self::NotFound(NotFoundError::Task(id)),
            RepositoryError::ProjectLimitReached { max } => {
                Self::Validation(ValidationError::ProjectLimitReached { max })
            }
            RepositoryError::TaskLimitReached { max } => {
                Self::Validation(ValidationError::TaskLimitReached { max })
            }
            other => Self::Repository(other),
        }
    }
}

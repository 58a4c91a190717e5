//! Application services for projects, tasks, and the overdue sweep.

mod error;
mod project;
mod sweeper;
mod task;

pub use error::{NotFoundError, TrackerError, TrackerResult};
pub use project::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
pub use sweeper::OverdueSweeper;
pub use task::{CreateTaskRequest, TaskService, UpdateTaskRequest};

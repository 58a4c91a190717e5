//! Domain model for projects and tasks.
//!
//! Values are built through validating constructors that receive the active
//! [`TrackerLimits`] or [`StatusSet`], so an aggregate never holds a field
//! that breaks a configured rule. Persistence concerns stay outside this
//! module.

mod deadline;
mod error;
mod ids;
mod limits;
mod project;
mod status;
mod task;
mod text;

pub use deadline::Deadline;
pub use error::{StatusSetError, ValidationError};
pub use ids::{ProjectId, TaskId};
pub use limits::TrackerLimits;
pub use project::{PersistedProjectData, Project, ProjectChanges};
pub use status::{StatusSet, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
pub use text::{Description, ProjectName, TaskTitle};

//! Error types for tracker domain validation.

use thiserror::Error;

/// Caller-supplied input violates a tracker business rule.
///
/// Every variant is raised before any state is mutated, so the caller can
/// correct the input and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The project name is empty after trimming.
    #[error("project name cannot be empty")]
    EmptyProjectName,

    /// The project name exceeds the configured maximum length.
    #[error("project name length cannot exceed {max}")]
    ProjectNameTooLong {
        /// Configured maximum, in characters.
        max: usize,
    },

    /// Another project already uses this name.
    #[error("project name '{0}' already exists")]
    DuplicateProjectName(String),

    /// The live project count already equals the configured maximum.
    #[error("maximum number of projects reached ({max})")]
    ProjectLimitReached {
        /// Configured maximum number of projects.
        max: usize,
    },

    /// The task title is empty after trimming.
    #[error("task title cannot be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the configured maximum length.
    #[error("task title length cannot exceed {max}")]
    TaskTitleTooLong {
        /// Configured maximum, in characters.
        max: usize,
    },

    /// A project or task description exceeds the configured maximum length.
    #[error("description length cannot exceed {max}")]
    DescriptionTooLong {
        /// Configured maximum, in characters.
        max: usize,
    },

    /// The status is not one of the configured values.
    #[error("invalid status '{value}', must be one of: {allowed}")]
    UnknownStatus {
        /// Rejected status value.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// The deadline text is not a valid calendar date.
    #[error("invalid date '{0}', use YYYY-MM-DD")]
    InvalidDeadline(String),

    /// The total task count across all projects equals the configured maximum.
    #[error("maximum number of tasks reached ({max})")]
    TaskLimitReached {
        /// Configured maximum number of tasks.
        max: usize,
    },
}

/// Errors returned while building the set of allowed task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatusSetError {
    /// No status values were supplied.
    #[error("status set must contain at least one value")]
    Empty,

    /// The same status value appears twice.
    #[error("duplicate status value: {0}")]
    Duplicate(String),

    /// The terminal status used by auto-close is missing.
    #[error("status set must contain the terminal value '{0}'")]
    MissingTerminal(&'static str),
}

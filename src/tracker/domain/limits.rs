//! Capacity and field-length limits applied by the tracker services.

/// Numeric limits enforced on projects and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerLimits {
    /// Maximum number of live projects.
    pub max_projects: usize,
    /// Maximum number of live tasks across all projects.
    pub max_tasks: usize,
    /// Maximum length of a project name or task title, in characters.
    pub title_max: usize,
    /// Maximum length of a description, in characters.
    pub description_max: usize,
}

impl TrackerLimits {
    /// Default maximum number of projects.
    pub const DEFAULT_MAX_PROJECTS: usize = 50;
    /// Default maximum number of tasks.
    pub const DEFAULT_MAX_TASKS: usize = 1000;
    /// Default maximum name and title length.
    pub const DEFAULT_TITLE_MAX: usize = 30;
    /// Default maximum description length.
    pub const DEFAULT_DESCRIPTION_MAX: usize = 150;
}

impl Default for TrackerLimits {
    fn default() -> Self {
        Self {
            max_projects: Self::DEFAULT_MAX_PROJECTS,
            max_tasks: Self::DEFAULT_MAX_TASKS,
            title_max: Self::DEFAULT_TITLE_MAX,
            description_max: Self::DEFAULT_DESCRIPTION_MAX,
        }
    }
}

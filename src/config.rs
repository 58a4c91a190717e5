//! Tracker configuration sourced from the environment.
//!
//! Configuration is built once at process start and handed to the services
//! as an `Arc<TrackerConfig>`; nothing reads the environment afterwards.

use crate::tracker::domain::{StatusSet, StatusSetError, TrackerLimits};
use thiserror::Error;

/// Environment variable holding the maximum number of projects.
pub const MAX_PROJECTS_VAR: &str = "MAX_NUMBER_OF_PROJECT";
/// Environment variable holding the maximum number of tasks.
pub const MAX_TASKS_VAR: &str = "MAX_NUMBER_OF_TASK";
/// Environment variable holding the maximum name and title length.
pub const TITLE_MAX_VAR: &str = "TITLE_MAX";
/// Environment variable holding the maximum description length.
pub const DESC_MAX_VAR: &str = "DESC_MAX";
/// Environment variable holding the comma-separated status values.
pub const STATUS_VALUES_VAR: &str = "STATUS_VALUES";

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable is not a positive integer.
    #[error("invalid value '{value}' for {name}, expected a positive integer")]
    InvalidLimit {
        /// Variable name.
        name: &'static str,
        /// Rejected raw value.
        value: String,
    },

    /// The status list is unusable.
    #[error("invalid STATUS_VALUES: {0}")]
    InvalidStatuses(#[from] StatusSetError),
}

/// Limits and allowed statuses shared by the tracker services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Capacity and length limits.
    pub limits: TrackerLimits,
    /// Allowed task statuses.
    pub statuses: StatusSet,
}

impl TrackerConfig {
    /// Creates a configuration from explicit parts.
    #[must_use]
    pub const fn new(limits: TrackerLimits, statuses: StatusSet) -> Self {
        Self { limits, statuses }
    }

    /// Loads configuration from the process environment, reading a `.env`
    /// file first when one exists. Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let limits = TrackerLimits {
            max_projects: limit(&lookup, MAX_PROJECTS_VAR, TrackerLimits::DEFAULT_MAX_PROJECTS)?,
            max_tasks: limit(&lookup, MAX_TASKS_VAR, TrackerLimits::DEFAULT_MAX_TASKS)?,
            title_max: limit(&lookup, TITLE_MAX_VAR, TrackerLimits::DEFAULT_TITLE_MAX)?,
            description_max: limit(
                &lookup,
                DESC_MAX_VAR,
                TrackerLimits::DEFAULT_DESCRIPTION_MAX,
            )?,
        };
        let statuses = match lookup(STATUS_VALUES_VAR) {
            Some(raw) => StatusSet::from_csv(&raw)?,
            None => StatusSet::default(),
        };
        Ok(Self::new(limits, statuses))
    }
}

/// Loads variables from a `.env` file in the working directory, if present.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(error = %err, "no .env file loaded");
    }
}

fn limit<F>(lookup: &F, name: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidLimit { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn unset_variables_use_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[])).expect("defaults load");
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.limits.max_projects, 50);
        assert_eq!(config.limits.max_tasks, 1000);
        assert_eq!(config.limits.title_max, 30);
        assert_eq!(config.limits.description_max, 150);
    }

    #[rstest]
    fn variables_override_defaults() {
        let config = TrackerConfig::from_lookup(lookup_from(&[
            (MAX_PROJECTS_VAR, "3"),
            (MAX_TASKS_VAR, " 7 "),
            (TITLE_MAX_VAR, "12"),
            (DESC_MAX_VAR, "40"),
            (STATUS_VALUES_VAR, "open, done"),
        ]))
        .expect("config loads");

        assert_eq!(
            config.limits,
            TrackerLimits {
                max_projects: 3,
                max_tasks: 7,
                title_max: 12,
                description_max: 40,
            }
        );
        assert_eq!(config.statuses.iter().collect::<Vec<_>>(), ["open", "done"]);
    }

    #[rstest]
    #[case(MAX_PROJECTS_VAR, "0")]
    #[case(MAX_TASKS_VAR, "-4")]
    #[case(TITLE_MAX_VAR, "thirty")]
    #[case(DESC_MAX_VAR, "")]
    fn non_positive_limits_are_rejected(#[case] name: &'static str, #[case] value: &str) {
        let result = TrackerConfig::from_lookup(lookup_from(&[(name, value)]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidLimit {
                name,
                value: value.to_owned(),
            })
        );
    }

    #[rstest]
    fn status_list_without_done_is_rejected() {
        let result =
            TrackerConfig::from_lookup(lookup_from(&[(STATUS_VALUES_VAR, "open,closed")]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidStatuses(StatusSetError::MissingTerminal(
                "done"
            )))
        );
    }
}

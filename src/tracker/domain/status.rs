//! Task status values and the configurable set they are drawn from.

use super::{StatusSetError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status a task carries. Membership in the allowed set is checked by
/// [`StatusSet::parse`]; values read back from storage are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(String);

impl TaskStatus {
    /// Terminal status assigned by the overdue auto-close routine.
    pub const TERMINAL: &'static str = "done";

    /// Preferred initial status for new tasks.
    pub const INITIAL: &'static str = "todo";

    /// Returns the terminal status.
    #[must_use]
    pub fn terminal() -> Self {
        Self(Self::TERMINAL.to_owned())
    }

    /// Wraps a status loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns `true` for the terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.0 == Self::TERMINAL
    }

    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of status values a task may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    values: Vec<String>,
}

impl StatusSet {
    /// Builds a status set from individual values. Values are trimmed and
    /// blank entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StatusSetError`] when the set is empty, contains duplicates,
    /// or lacks [`TaskStatus::TERMINAL`].
    pub fn new<I, S>(values: I) -> Result<Self, StatusSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected: Vec<String> = Vec::new();
        for raw in values {
            let value = raw.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            if collected.iter().any(|existing| existing == value) {
                return Err(StatusSetError::Duplicate(value.to_owned()));
            }
            collected.push(value.to_owned());
        }

        if collected.is_empty() {
            return Err(StatusSetError::Empty);
        }
        if !collected.iter().any(|value| value == TaskStatus::TERMINAL) {
            return Err(StatusSetError::MissingTerminal(TaskStatus::TERMINAL));
        }
        Ok(Self { values: collected })
    }

    /// Parses a comma-separated list such as `todo,doing,done`.
    ///
    /// # Errors
    ///
    /// See [`StatusSet::new`].
    pub fn from_csv(value: &str) -> Result<Self, StatusSetError> {
        Self::new(value.split(','))
    }

    /// Validates a caller-supplied status against the set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownStatus`] for values outside the set.
    pub fn parse(&self, value: &str) -> Result<TaskStatus, ValidationError> {
        let candidate = value.trim();
        if self.contains(candidate) {
            return Ok(TaskStatus(candidate.to_owned()));
        }
        Err(ValidationError::UnknownStatus {
            value: value.to_owned(),
            allowed: self.values.join(", "),
        })
    }

    /// Returns the status given to tasks created without one: `todo` when
    /// configured, otherwise the first configured value.
    #[must_use]
    pub fn default_status(&self) -> TaskStatus {
        let value = if self.contains(TaskStatus::INITIAL) {
            TaskStatus::INITIAL
        } else {
            self.values
                .first()
                .map_or(TaskStatus::TERMINAL, String::as_str)
        };
        TaskStatus(value.to_owned())
    }

    /// Returns `true` when `value` is an allowed status.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|allowed| allowed == value)
    }

    /// Returns the allowed values in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self {
            values: vec!["todo".to_owned(), "doing".to_owned(), "done".to_owned()],
        }
    }
}

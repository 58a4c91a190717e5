//! Validated text fields shared by projects and tasks.

use super::{TrackerLimits, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Trimmed, non-empty project name within the configured length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Creates a validated project name.
    ///
    /// Surrounding whitespace is removed before validation. Comparison
    /// between names is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyProjectName`] or
    /// [`ValidationError::ProjectNameTooLong`].
    pub fn new(value: &str, limits: &TrackerLimits) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        if char_len(trimmed) > limits.title_max {
            return Err(ValidationError::ProjectNameTooLong {
                max: limits.title_max,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a name loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed, non-empty task title within the configured length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTaskTitle`] or
    /// [`ValidationError::TaskTitleTooLong`].
    pub fn new(value: &str, limits: &TrackerLimits) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        if char_len(trimmed) > limits.title_max {
            return Err(ValidationError::TaskTitleTooLong {
                max: limits.title_max,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a title loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form description, possibly empty, within the configured length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a validated description. Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DescriptionTooLong`] when the trimmed text
    /// exceeds the configured maximum.
    pub fn new(value: &str, limits: &TrackerLimits) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if char_len(trimmed) > limits.description_max {
            return Err(ValidationError::DescriptionTooLong {
                max: limits.description_max,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a description loaded from storage without re-validating it.
    #[must_use]
    pub const fn from_persisted(value: String) -> Self {
        Self(value)
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the description is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

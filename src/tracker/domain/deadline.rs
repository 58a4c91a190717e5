//! Calendar-date deadlines.

use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deadline of a task: a calendar date with no time or timezone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Textual format accepted and produced at the service boundary.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDeadline`] when the text is not a
    /// valid calendar date, such as `2024-02-30`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let candidate = text.trim();
        if !has_iso_date_shape(candidate) {
            return Err(ValidationError::InvalidDeadline(text.to_owned()));
        }
        NaiveDate::parse_from_str(candidate, Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDeadline(text.to_owned()))
    }

    /// Wraps an existing date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the wrapped date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns `true` when the deadline is strictly before `today`.
    #[must_use]
    pub fn is_before(self, today: NaiveDate) -> bool {
        self.0 < today
    }
}

/// Zero-padded `YYYY-MM-DD`: ten bytes with dashes at offsets 4 and 7.
fn has_iso_date_shape(text: &str) -> bool {
    text.len() == 10
        && text.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

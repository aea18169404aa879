//! Announcement deadline type.

use core::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format accepted from the HTML date input.
const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Format used when storing and displaying a deadline.
const DISPLAY_FORMAT: &str = "%Y年%m月%d日";

/// Years whose display form has exactly four digits. Outside this range
/// text order stops matching date order.
const YEAR_RANGE: core::ops::RangeInclusive<i32> = 1000..=9999;

/// Errors that can occur when parsing a [`Deadline`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeadlineError {
    /// The input string is empty.
    #[error("deadline cannot be empty")]
    Empty,
    /// The input is not a `YYYY-MM-DD` calendar date.
    #[error("deadline must be a date in YYYY-MM-DD format (got {0:?})")]
    InvalidDate(String),
}

/// A human-readable deadline such as `2024年01月31日`.
///
/// Deadlines are stored as display text rather than as a date column. The
/// zero-padded format keeps lexical order equal to chronological order, so
/// `ORDER BY deadline` sorts entries by date.
///
/// ## Examples
///
/// ```
/// use notice_board_core::Deadline;
///
/// let deadline = Deadline::from_iso_date("2024-03-05").unwrap();
/// assert_eq!(deadline.as_str(), "2024年03月05日");
///
/// assert!(Deadline::from_iso_date("").is_err());
/// assert!(Deadline::from_iso_date("2024-02-30").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Deadline(String);

impl Deadline {
    /// Parse a `YYYY-MM-DD` date (as submitted by `<input type="date">`)
    /// into its display form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, is not a valid calendar date,
    /// or has a year outside 1000 to 9999.
    pub fn from_iso_date(input: &str) -> Result<Self, DeadlineError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DeadlineError::Empty);
        }

        let date = NaiveDate::parse_from_str(trimmed, INPUT_FORMAT)
            .map_err(|_| DeadlineError::InvalidDate(trimmed.to_owned()))?;

        if !YEAR_RANGE.contains(&date.year()) {
            return Err(DeadlineError::InvalidDate(trimmed.to_owned()));
        }

        Ok(Self::from_date(date))
    }

    /// Display form of a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DISPLAY_FORMAT).to_string())
    }

    /// Wrap a value read back from storage.
    ///
    /// Stored rows are trusted as-is; rows written before the display format
    /// was fixed are shown verbatim rather than rejected.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Returns the deadline text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Deadline` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Deadline {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Migration targets for carrying open tasks forward.

use super::{BucketError, BucketKey, ParseJournalValueError, add_days, add_months_clamp_to_first};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a migrated task should land relative to its source bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationTarget {
    /// The following day.
    #[serde(rename = "tomorrow")]
    Tomorrow,
    /// The next Monday strictly after the source date.
    #[serde(rename = "week")]
    NextWeek,
    /// Day 1 of the following calendar month.
    #[serde(rename = "month")]
    NextMonth,
}

impl MigrationTarget {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tomorrow => "tomorrow",
            Self::NextWeek => "week",
            Self::NextMonth => "month",
        }
    }

    /// Computes the target date for a task filed under `from`.
    ///
    /// The result is always strictly after `from`; for
    /// [`MigrationTarget::NextMonth`] it is always in a later calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::OutOfRange`] at the end of the calendar range.
    pub fn target_date(self, from: NaiveDate) -> Result<NaiveDate, BucketError> {
        match self {
            Self::Tomorrow => add_days(from, 1),
            Self::NextWeek => {
                // Monday yields 7, never 0.
                let days_to_monday = 7 - i64::from(from.weekday().num_days_from_monday());
                add_days(from, days_to_monday)
            }
            Self::NextMonth => add_months_clamp_to_first(from, 1),
        }
    }

    /// Computes the target bucket for a task filed under `from`.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::OutOfRange`] at the end of the calendar range.
    pub fn target_bucket(self, from: BucketKey) -> Result<BucketKey, BucketError> {
        self.target_date(from.date()).map(BucketKey::from_date)
    }
}

impl TryFrom<&str> for MigrationTarget {
    type Error = ParseJournalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "tomorrow" => Ok(Self::Tomorrow),
            "week" => Ok(Self::NextWeek),
            "month" => Ok(Self::NextMonth),
            _ => Err(ParseJournalValueError::new("migration target", value)),
        }
    }
}

impl fmt::Display for MigrationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

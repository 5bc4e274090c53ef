//! Journal views and the bucket each one shows.

use super::{BucketKey, ParseJournalValueError, start_of_month, start_of_week};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four journal views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogView {
    /// One calendar day.
    Daily,
    /// The weekly master list, anchored on Monday.
    Weekly,
    /// The monthly master list, anchored on day 1.
    Monthly,
    /// Project list; not bucketed by date.
    Projects,
}

impl LogView {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Projects => "projects",
        }
    }

    /// Returns the bucket this view shows while `date` is selected.
    ///
    /// Returns `None` for [`LogView::Projects`], which lists entries across
    /// all buckets.
    #[must_use]
    pub fn bucket_for(self, date: NaiveDate) -> Option<BucketKey> {
        match self {
            Self::Daily => Some(BucketKey::from_date(date)),
            Self::Weekly => Some(BucketKey::from_date(start_of_week(date))),
            Self::Monthly => Some(BucketKey::from_date(start_of_month(date))),
            Self::Projects => None,
        }
    }
}

impl TryFrom<&str> for LogView {
    type Error = ParseJournalValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "projects" => Ok(Self::Projects),
            _ => Err(ParseJournalValueError::new("log view", value)),
        }
    }
}

impl fmt::Display for LogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Date bucket keys and the calendar arithmetic that produces them.
//!
//! A bucket key is the calendar date a journal entry is filed under. Daily
//! logs use the actual day; weekly and monthly master lists use an anchor
//! date (the Monday of the ISO week, or the first day of the month).
//!
//! All arithmetic works on [`NaiveDate`], which has no time-of-day
//! component, so keys never drift across midnight or daylight-saving
//! boundaries.

use super::BucketError;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";
const KEY_LEN: usize = 10;

/// Calendar date under which journal entries are stored.
///
/// Renders and parses strictly as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketKey(NaiveDate);

impl BucketKey {
    /// Wraps an already valid calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a key from year, month and day components.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::InvalidDate`] when the components do not name a
    /// real calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, BucketError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| BucketError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Parses a `YYYY-MM-DD` key.
    ///
    /// # Errors
    ///
    /// Returns [`BucketError::InvalidDate`] for anything other than a zero
    /// padded ISO calendar date naming a real day. Surrounding whitespace is
    /// rejected.
    pub fn parse(value: &str) -> Result<Self, BucketError> {
        let well_formed = value.len() == KEY_LEN
            && value.char_indices().all(|(index, ch)| match index {
                4 | 7 => ch == '-',
                _ => ch.is_ascii_digit(),
            });
        if !well_formed {
            return Err(BucketError::InvalidDate(value.to_owned()));
        }

        NaiveDate::parse_from_str(value, KEY_FORMAT)
            .map(Self)
            .map_err(|_| BucketError::InvalidDate(value.to_owned()))
    }

    /// Returns the key for the clock's current local calendar day.
    #[must_use]
    pub fn today(clock: &impl Clock) -> Self {
        to_iso_date(&clock.local())
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the weekly master-list anchor for this day.
    #[must_use]
    pub fn week_anchor(self) -> Self {
        Self(start_of_week(self.0))
    }

    /// Returns the monthly master-list anchor for this day.
    #[must_use]
    pub fn month_anchor(self) -> Self {
        Self(start_of_month(self.0))
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for BucketKey {
    type Err = BucketError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for BucketKey {
    type Error = BucketError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for BucketKey {
    type Error = BucketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BucketKey> for String {
    fn from(key: BucketKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for BucketKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Returns the bucket key for an instant, using the calendar date in the
/// instant's own time zone.
///
/// Two instants on the same local day always produce the same key,
/// whatever their time of day.
#[must_use]
pub fn to_iso_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> BucketKey {
    BucketKey(instant.date_naive())
}

/// Returns the Monday on or before `date`.
///
/// Saturates at [`NaiveDate::MIN`] for the first representable week.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the first day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Moves `date` by `days`, forwards or backwards.
///
/// # Errors
///
/// Returns [`BucketError::OutOfRange`] when the result is not representable.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, BucketError> {
    let step = Days::new(days.unsigned_abs());
    let moved = if days.is_negative() {
        date.checked_sub_days(step)
    } else {
        date.checked_add_days(step)
    };
    moved.ok_or(BucketError::OutOfRange(date))
}

/// Returns day 1 of the month `months` after the month containing `date`.
///
/// # Errors
///
/// Returns [`BucketError::OutOfRange`] when the result is not representable.
pub fn add_months_clamp_to_first(date: NaiveDate, months: u32) -> Result<NaiveDate, BucketError> {
    start_of_month(date)
        .checked_add_months(Months::new(months))
        .ok_or(BucketError::OutOfRange(date))
}

//! # Temporal Types — Civil Dates, Ages and Audit Timestamps
//!
//! Licensing rules work on calendar dates: a holder's birthday, the day a
//! license was issued, the day it expires. These are `chrono::NaiveDate`
//! values with no time zone attached. Transition logs record instants as
//! [`Timestamp`], which is UTC-only and truncated to seconds.
//!
//! ## Leap Days
//!
//! A February 29 anniversary in a non-leap year is clamped to February 28.
//! A holder born on February 29 therefore has a license expiring on
//! February 28 in common years, and turns a year older on March 1.

use chrono::{DateTime, Datelike, Local, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// ISO calendar date format accepted at the API boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current local calendar date.
///
/// Municipal offices issue licenses by local date; every rule that needs
/// "today" takes it as a parameter, and callers obtain it from here.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| ValidationError::InvalidDate {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// A holder's age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Age(u32);

impl Age {
    /// Construct an age from a caller-supplied integer.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NegativeAge`] if `years < 0`.
    pub fn new(years: i64) -> Result<Self, ValidationError> {
        u32::try_from(years)
            .map(Self)
            .map_err(|_| ValidationError::NegativeAge(years))
    }

    /// Construct an age from an unsigned value. Infallible.
    pub const fn from_years(years: u32) -> Self {
        Self(years)
    }

    /// Whole years.
    pub const fn years(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl std::fmt::Display for Age {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age in whole years on `today` for someone born on `birth_date`.
///
/// # Errors
///
/// [`ValidationError::BirthDateInFuture`] if `birth_date > today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Result<Age, ValidationError> {
    if birth_date > today {
        return Err(ValidationError::BirthDateInFuture { birth_date, today });
    }
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    Age::new(i64::from(years))
}

/// The anniversary of `date` (same month and day) in `year`.
///
/// February 29 clamps to February 28 when `year` is not a leap year.
pub fn anniversary_in_year(date: NaiveDate, year: i32) -> Result<NaiveDate, ValidationError> {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| {
            if date.month() == 2 && date.day() == 29 {
                NaiveDate::from_ymd_opt(year, 2, 28)
            } else {
                None
            }
        })
        .ok_or_else(|| {
            ValidationError::DateOutOfRange(format!(
                "no anniversary of {date} in year {year}"
            ))
        })
}

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Used for lifecycle transition logs, where the instant matters rather
/// than the calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// From a `DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

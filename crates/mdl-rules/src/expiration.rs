//! # Expiration Date Calculator
//!
//! A license expires on the holder's birthday, `validity` years after the
//! year it is issued. February 29 birthdays expire on February 28 in
//! common years.

use chrono::{Datelike, NaiveDate};
use mdl_core::{anniversary_in_year, ValidationError};

/// Expiration date for a license issued on `today`.
///
/// # Errors
///
/// - [`ValidationError::BirthDateInFuture`] if `birth_date > today`.
/// - [`ValidationError::DateOutOfRange`] if the target year is not representable.
pub fn calculate_expiration_date(
    birth_date: NaiveDate,
    validity_years: u32,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if birth_date > today {
        return Err(ValidationError::BirthDateInFuture { birth_date, today });
    }
    let target_year = i32::try_from(validity_years)
        .ok()
        .and_then(|years| today.year().checked_add(years))
        .ok_or_else(|| {
            ValidationError::DateOutOfRange(format!(
                "{validity_years} years after {today}"
            ))
        })?;
    anniversary_in_year(birth_date, target_year)
}

/// [`calculate_expiration_date`] evaluated on the current local date.
pub fn calculate_expiration_date_from_today(
    birth_date: NaiveDate,
    validity_years: u32,
) -> Result<NaiveDate, ValidationError> {
    calculate_expiration_date(birth_date, validity_years, mdl_core::today())
}

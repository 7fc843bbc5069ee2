//! # Error Types — Input Validation
//!
//! Caller contract violations: values that no licensing rule can be
//! evaluated against. These are distinct from eligibility rejections, which
//! are ordinary outcomes and never surface as errors.

use chrono::NaiveDate;
use thiserror::Error;

/// A malformed input to the licensing ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ages are whole years and never negative.
    #[error("age must be non-negative, got {0}")]
    NegativeAge(i64),

    /// Class identifiers must contain at least one non-whitespace character.
    #[error("license class id must not be empty")]
    EmptyClassId,

    /// Class identifiers must not contain control characters.
    #[error("license class id {0:?} contains control characters")]
    InvalidClassId(String),

    /// Holder identifiers (national document numbers) must not be empty.
    #[error("holder id must not be empty")]
    EmptyHolderId,

    /// The holder's birth date lies after the date the rules are evaluated on.
    #[error("birth date {birth_date} is after the reference date {today}")]
    BirthDateInFuture {
        /// Birth date supplied by the caller.
        birth_date: NaiveDate,
        /// Date the evaluation was performed for.
        today: NaiveDate,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// Date arithmetic left the representable calendar range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
}

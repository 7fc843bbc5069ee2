//! # Validity Calculator
//!
//! Maps a holder's age to the number of years a license stays valid.
//! Younger drivers start with a one-year probationary license; validity is
//! longest in mid-life and shortens again with age.
//!
//! | age | years |
//! |-----|-------|
//! | < 21, first license | 1 |
//! | < 21, otherwise | 3 |
//! | 21..=46 | 5 |
//! | 47..=60 | 4 |
//! | 61..=70 | 3 |
//! | > 70 | 1 |

use mdl_core::Age;
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Every validity period the ruleset can produce.
pub const VALIDITY_YEARS: [u32; 4] = [1, 3, 4, 5];

/// A license validity period in years. Always one of [`VALIDITY_YEARS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Validity(u32);

impl Validity {
    /// Construct from a year count, rejecting anything outside [`VALIDITY_YEARS`].
    pub fn from_years(years: u32) -> Result<Self, RulesError> {
        if VALIDITY_YEARS.contains(&years) {
            Ok(Self(years))
        } else {
            Err(RulesError::UnsupportedValidity(years))
        }
    }

    /// Validity in years.
    pub const fn years(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Validity {
    type Error = RulesError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_years(value)
    }
}

impl From<Validity> for u32 {
    fn from(v: Validity) -> Self {
        v.0
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => f.write_str("1 year"),
            n => write!(f, "{n} years"),
        }
    }
}

/// Validity period for a holder of `age`.
///
/// `is_first_time` only matters under 21. Never fails.
pub fn calculate_validity(age: Age, is_first_time: bool) -> Validity {
    let years = match age.years() {
        0..=20 if is_first_time => 1,
        0..=20 => 3,
        21..=46 => 5,
        47..=60 => 4,
        61..=70 => 3,
        _ => 1,
    };
    Validity(years)
}

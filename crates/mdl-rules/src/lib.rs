#![deny(missing_docs)]

//! # mdl-rules — Driver-License Eligibility and Fee Ruleset
//!
//! Deterministic rules deciding what a holder pays, how long a license is
//! valid, when it expires, and whether the holder qualifies at all.
//!
//! - **Catalog** (`catalog.rs`): license classes with minimum ages and the
//!   professional flag.
//! - **Fees** (`fees.rs`): base costs per class and validity period, the
//!   administrative surcharge, and the renewal discount.
//! - **Validity** (`validity.rs`): age → validity years.
//! - **Eligibility** (`eligibility.rs`): age minimums and professional
//!   prerequisites, reported as a value rather than an error.
//! - **Expiration** (`expiration.rs`): expiry on the holder's birthday.
//! - **Rulebook** (`rulebook.rs`): the tables as one immutable value, built
//!   in or loaded from YAML/JSON.
//! - **Quote** (`quote.rs`): original, renewal and duplicate workflows.
//!
//! The free functions at the crate root evaluate against
//! [`Rulebook::standard()`]. Every function is pure given its inputs;
//! "today" is always passed in, never read implicitly, except in the
//! `*_from_today` conveniences.
//!
//! ## Crate Policy
//!
//! - Depends only on `mdl-core` internally.
//! - Amounts are integer currency units; no floating point anywhere.

pub mod catalog;
pub mod eligibility;
pub mod error;
pub mod expiration;
pub mod fees;
pub mod quote;
pub mod rulebook;
pub mod validity;

use chrono::NaiveDate;
use mdl_core::{Age, ClassId, PriorLicense, ValidationError};

pub use catalog::{ClassCatalog, LicenseClass};
pub use eligibility::{Eligibility, RejectionReason};
pub use error::{RulebookError, RulesError};
pub use expiration::{calculate_expiration_date, calculate_expiration_date_from_today};
pub use fees::{apply_discount, FeeBreakdown, FeeSchedule};
pub use quote::{IssuanceKind, Quote, QuoteRequest};
pub use rulebook::{ClassEntry, Rulebook, RulebookFile};
pub use validity::{calculate_validity, Validity, VALIDITY_YEARS};

/// Validity period under the standard rules.
pub fn validity(age: Age, is_first_time: bool) -> Validity {
    Rulebook::standard().validity(age, is_first_time)
}

/// Fee under the standard schedule. Unknown classes and periods fall back.
pub fn fee(class: &ClassId, validity_years: u32, is_renewal: bool) -> FeeBreakdown {
    Rulebook::standard().fee(class, validity_years, is_renewal)
}

/// Eligibility for `requested` under the standard catalog.
pub fn eligibility(
    age: Age,
    requested: &LicenseClass,
    prior_licenses: &[PriorLicense],
    today: NaiveDate,
) -> Eligibility {
    Rulebook::standard().eligibility(age, requested, prior_licenses, today)
}

/// Expiration date for a license issued on `today`.
pub fn expiration_date(
    birth_date: NaiveDate,
    validity_years: u32,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    calculate_expiration_date(birth_date, validity_years, today)
}

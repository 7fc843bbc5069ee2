#![deny(missing_docs)]

//! # mdl-core — Foundational Types for Municipal Driver Licensing
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate builds on: validated identifiers, civil-date arithmetic, the
//! license-holder model, and the input-validation error type.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ClassId`, `HolderId`,
//!    `LicenseId`, `Age`: all newtypes with validated constructors. A
//!    negative age or an empty class id cannot be represented.
//!
//! 2. **Calendar dates, not instants.** Birth dates, issue dates and
//!    expirations are `chrono::NaiveDate`. "Today" is always an explicit
//!    argument; [`temporal::today()`] is the only place that reads the clock.
//!
//! 3. **Validation is not eligibility.** A malformed input is a
//!    [`ValidationError`]; a holder who does not qualify is a normal value
//!    produced by the rules crate.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mdl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod error;
pub mod holder;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use holder::{LicenseHolder, PriorLicense};
pub use identity::{ClassId, HolderId, LicenseId};
pub use temporal::{age_on, anniversary_in_year, parse_date, today, Age, Timestamp};

#![deny(missing_docs)]

//! # mdl-state — License Lifecycle Records
//!
//! Issued licenses as records with an auditable transition log.
//!
//! - **License** (`license.rs`): `Valid → Suspended → Valid`, `Valid →
//!   Expired`, `Valid | Suspended → Revoked`, and `Valid | Expired →
//!   Superseded` when a renewal or duplicate is issued.
//!
//! Licenses are only ever created from a [`mdl_rules::Quote`], so the price,
//! validity and expiry on a license are exactly what the ruleset computed
//! at the counter.

pub mod license;

pub use license::{
    License, LicenseError, LicenseState, LicenseTransitionEvidence, LicenseTransitionRecord,
};

#![deny(missing_docs)]

//! # mdl-cli — Driver-License Ruleset Command-Line Interface
//!
//! A thin clap front end over `mdl-rules`, for counter staff and for
//! checking a tariff file before it is deployed.
//!
//! ## Subcommands
//!
//! - `validity`: validity period for an age
//! - `fee`: itemized fee for a class and period
//! - `eligibility`: whether an age and license history qualify for a class
//! - `expiration`: expiry date for a birth date and period
//! - `quote`: full original / renewal / duplicate quote for a holder file
//! - `classes`: list the active class catalog
//! - `rulebook`: print the active rulebook as YAML
//!
//! ## Exit Codes
//!
//! `0` success, `1` error, `2` the holder is not eligible.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every rule lives in `mdl-rules`.
//! - `--json` switches every subcommand to machine-readable output.

pub mod calc;
pub mod catalog;
pub mod eligibility;
pub mod quote;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use mdl_rules::Rulebook;

/// Exit code for a successful run.
pub const EXIT_OK: u8 = 0;

/// Exit code when the holder is not eligible.
pub const EXIT_NOT_ELIGIBLE: u8 = 2;

/// Shared state for every subcommand.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Active rulebook.
    pub rulebook: Rulebook,
    /// Emit JSON instead of text.
    pub json: bool,
}

impl CliContext {
    /// Build the context, loading `rulebook` if given, otherwise the standard one.
    pub fn load(rulebook: Option<&Path>, json: bool) -> Result<Self> {
        let rulebook = match rulebook {
            Some(path) => Rulebook::load(path)
                .with_context(|| format!("failed to load rulebook {}", path.display()))?,
            None => {
                tracing::debug!("using standard rulebook");
                Rulebook::standard().clone()
            }
        };
        Ok(Self { rulebook, json })
    }

    /// Print `value` as JSON, or `text` otherwise.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

/// Resolve an optional `--today` override to a date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => Ok(mdl_core::parse_date(s)?),
        None => Ok(mdl_core::today()),
    }
}

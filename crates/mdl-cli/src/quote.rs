//! # Quote Subcommand
//!
//! Prices an original, renewal or duplicate for a holder described in a
//! JSON or YAML file:
//!
//! ```yaml
//! id: "30111222"
//! birth_date: 1990-06-15
//! prior_licenses:
//!   - class_id: B
//!     issued_on: 2010-07-01
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mdl_core::{ClassId, LicenseHolder};
use mdl_rules::{IssuanceKind, QuoteRequest};

use crate::{resolve_today, CliContext, EXIT_NOT_ELIGIBLE, EXIT_OK};

/// Workflow selector.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// First license of a class.
    Original,
    /// Renewal of an existing license.
    Renewal,
    /// Replacement copy.
    Duplicate,
}

impl From<KindArg> for IssuanceKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Original => IssuanceKind::Original,
            KindArg::Renewal => IssuanceKind::Renewal,
            KindArg::Duplicate => IssuanceKind::Duplicate,
        }
    }
}

/// Arguments for `mdl quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Holder file (.json, .yaml or .yml).
    #[arg(long, value_name = "FILE")]
    pub holder: PathBuf,

    /// Requested license class.
    #[arg(long = "class")]
    pub class_id: String,

    /// Workflow.
    #[arg(long, value_enum, default_value_t = KindArg::Original)]
    pub kind: KindArg,

    /// Expiry of the license being copied (duplicates only).
    #[arg(long)]
    pub current_expiry: Option<String>,

    /// Evaluation date override (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub today: Option<String>,
}

/// Read a holder record from JSON or YAML, chosen by extension.
pub fn load_holder(path: &Path) -> Result<LicenseHolder> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read holder file: {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let holder = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse holder JSON: {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse holder YAML: {}", path.display()))?
    };
    Ok(holder)
}

/// Execute `mdl quote`.
///
/// Returns [`EXIT_NOT_ELIGIBLE`] when the quote is rejected.
pub fn run_quote(args: &QuoteArgs, ctx: &CliContext) -> Result<u8> {
    let holder = load_holder(&args.holder)?;
    let today = resolve_today(args.today.as_deref())?;
    let mut request = QuoteRequest::new(holder, ClassId::parse(&args.class_id)?, args.kind.into());
    request.current_expiry = args
        .current_expiry
        .as_deref()
        .map(mdl_core::parse_date)
        .transpose()?;

    let quote = ctx.rulebook.quote(&request, today)?;

    ctx.emit(&quote, || {
        let mut lines = vec![
            format!("Holder: {}", request.holder.id),
            format!("Class: {} ({})", quote.class_id, quote.kind),
            format!("Age: {}", quote.age),
        ];
        match quote.eligibility.reason() {
            Some(reason) => lines.push(format!("NOT ELIGIBLE: {reason}")),
            None => {
                if let Some(v) = quote.validity {
                    lines.push(format!("Validity: {v}"));
                }
                if let Some(fee) = quote.fee {
                    lines.push(format!("Fee: {}", fee.amount));
                }
                if let Some(d) = quote.expires_on {
                    lines.push(format!("Expires on: {d}"));
                }
            }
        }
        lines.join("\n")
    })?;

    Ok(if quote.is_issuable() {
        EXIT_OK
    } else {
        EXIT_NOT_ELIGIBLE
    })
}

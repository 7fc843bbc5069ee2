//! # Eligibility Subcommand
//!
//! Checks an age and license history against a class without a holder
//! file. Prior licenses are given as `CLASS:YYYY-MM-DD`.

use anyhow::{bail, Result};
use clap::Args;

use mdl_core::{Age, ClassId, PriorLicense};

use crate::{resolve_today, CliContext, EXIT_NOT_ELIGIBLE, EXIT_OK};

/// Arguments for `mdl eligibility`.
#[derive(Args, Debug)]
pub struct EligibilityArgs {
    /// Holder age in whole years.
    #[arg(long, allow_negative_numbers = true)]
    pub age: i64,

    /// Requested license class.
    #[arg(long = "class")]
    pub class_id: String,

    /// Prior license as CLASS:YYYY-MM-DD. Repeatable.
    #[arg(long = "prior", value_name = "CLASS:DATE")]
    pub prior: Vec<String>,

    /// Evaluation date override (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub today: Option<String>,
}

/// Parse `CLASS:YYYY-MM-DD`.
pub fn parse_prior(s: &str) -> Result<PriorLicense> {
    let Some((class, date)) = s.split_once(':') else {
        bail!("prior license {s:?} must be CLASS:YYYY-MM-DD");
    };
    Ok(PriorLicense::new(
        ClassId::parse(class)?,
        mdl_core::parse_date(date)?,
    ))
}

/// Execute `mdl eligibility`.
///
/// Returns [`EXIT_NOT_ELIGIBLE`] when the holder does not qualify.
pub fn run_eligibility(args: &EligibilityArgs, ctx: &CliContext) -> Result<u8> {
    let age = Age::new(args.age)?;
    let class = ctx.rulebook.require_class(&ClassId::parse(&args.class_id)?)?;
    let prior = args
        .prior
        .iter()
        .map(|p| parse_prior(p))
        .collect::<Result<Vec<_>>>()?;
    let today = resolve_today(args.today.as_deref())?;

    let result = ctx.rulebook.eligibility(age, class, &prior, today);
    ctx.emit(&result, || match result.reason() {
        None => format!("ELIGIBLE: class {} at age {age}", class.id),
        Some(reason) => format!("NOT ELIGIBLE: class {} at age {age}: {reason}", class.id),
    })?;

    Ok(if result.is_eligible() {
        EXIT_OK
    } else {
        EXIT_NOT_ELIGIBLE
    })
}

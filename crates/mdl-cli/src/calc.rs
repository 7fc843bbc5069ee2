//! # Calculator Subcommands
//!
//! `validity`, `fee` and `expiration`: one calculator each, no holder file.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use mdl_core::{Age, ClassId};

use crate::{resolve_today, CliContext, EXIT_OK};

/// Arguments for `mdl validity`.
#[derive(Args, Debug)]
pub struct ValidityArgs {
    /// Holder age in whole years.
    #[arg(long, allow_negative_numbers = true)]
    pub age: i64,

    /// The holder has never held a license.
    #[arg(long)]
    pub first_time: bool,
}

/// Arguments for `mdl fee`.
#[derive(Args, Debug)]
pub struct FeeArgs {
    /// License class.
    #[arg(long = "class")]
    pub class_id: String,

    /// Validity period in years.
    #[arg(long)]
    pub years: u32,

    /// Apply the renewal discount.
    #[arg(long)]
    pub renewal: bool,
}

/// Arguments for `mdl expiration`.
#[derive(Args, Debug)]
pub struct ExpirationArgs {
    /// Birth date (YYYY-MM-DD).
    #[arg(long)]
    pub birth_date: String,

    /// Validity period in years.
    #[arg(long)]
    pub years: u32,

    /// Issue date override (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub today: Option<String>,
}

#[derive(Serialize)]
struct ValidityOutput {
    age: Age,
    first_time: bool,
    years: u32,
}

#[derive(Serialize)]
struct ExpirationOutput {
    birth_date: chrono::NaiveDate,
    years: u32,
    issued_on: chrono::NaiveDate,
    expires_on: chrono::NaiveDate,
}

/// Execute `mdl validity`.
pub fn run_validity(args: &ValidityArgs, ctx: &CliContext) -> Result<u8> {
    let age = Age::new(args.age)?;
    let validity = ctx.rulebook.validity(age, args.first_time);
    let out = ValidityOutput {
        age,
        first_time: args.first_time,
        years: validity.years(),
    };
    ctx.emit(&out, || format!("Validity: {validity}"))?;
    Ok(EXIT_OK)
}

/// Execute `mdl fee`.
pub fn run_fee(args: &FeeArgs, ctx: &CliContext) -> Result<u8> {
    let class = ClassId::parse(&args.class_id)?;
    if !ctx.rulebook.catalog().contains(&class) {
        tracing::warn!(class = %class, "class not in catalog; pricing from fallback table");
    }
    let fee = ctx.rulebook.fee(&class, args.years, args.renewal);
    ctx.emit(&fee, || {
        let mut text = format!(
            "Base: {}\nAdministrative surcharge: {}\n",
            fee.base, fee.administrative_surcharge
        );
        if args.renewal {
            text.push_str(&format!("Renewal discount: -{}\n", fee.renewal_discount));
        }
        text.push_str(&format!("Total: {}", fee.amount));
        text
    })?;
    Ok(EXIT_OK)
}

/// Execute `mdl expiration`.
pub fn run_expiration(args: &ExpirationArgs, ctx: &CliContext) -> Result<u8> {
    let birth_date = mdl_core::parse_date(&args.birth_date)?;
    let today = resolve_today(args.today.as_deref())?;
    let expires_on = mdl_rules::calculate_expiration_date(birth_date, args.years, today)?;
    let out = ExpirationOutput {
        birth_date,
        years: args.years,
        issued_on: today,
        expires_on,
    };
    ctx.emit(&out, || format!("Expires on: {expires_on}"))?;
    Ok(EXIT_OK)
}

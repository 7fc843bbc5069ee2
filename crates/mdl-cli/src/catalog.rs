//! # Catalog Subcommands
//!
//! `classes` lists the active catalog with its fee tables; `rulebook`
//! prints the active rulebook in the file format `--rulebook` accepts, as
//! a starting point for a municipality's own tariff.

use anyhow::Result;
use clap::Args;

use crate::{CliContext, EXIT_OK};

/// Arguments for `mdl classes`.
#[derive(Args, Debug)]
pub struct ClassesArgs {
    /// Only list professional classes.
    #[arg(long)]
    pub professional: bool,
}

/// Execute `mdl classes`.
pub fn run_classes(args: &ClassesArgs, ctx: &CliContext) -> Result<u8> {
    let classes: Vec<_> = ctx
        .rulebook
        .catalog()
        .iter()
        .filter(|c| !args.professional || c.is_professional)
        .collect();

    ctx.emit(&classes, || {
        classes
            .iter()
            .map(|c| {
                let fees = ctx
                    .rulebook
                    .fees()
                    .table(c.id.as_str())
                    .map(|t| {
                        t.iter()
                            .map(|(years, cost)| format!("{years}y={cost}"))
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_else(|| "(fallback)".to_string());
                format!(
                    "{:<4} min_age={:<3} {:<13} {fees}  {}",
                    c.id.as_str(),
                    c.min_age,
                    if c.is_professional { "professional" } else { "" },
                    c.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(EXIT_OK)
}

/// Execute `mdl rulebook`.
pub fn run_rulebook(ctx: &CliContext) -> Result<u8> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ctx.rulebook.to_file())?);
    } else {
        print!("{}", ctx.rulebook.to_yaml()?);
    }
    Ok(EXIT_OK)
}

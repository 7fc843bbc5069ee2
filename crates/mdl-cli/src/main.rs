//! # mdl CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdl_cli::calc::{run_expiration, run_fee, run_validity, ExpirationArgs, FeeArgs, ValidityArgs};
use mdl_cli::catalog::{run_classes, run_rulebook, ClassesArgs};
use mdl_cli::eligibility::{run_eligibility, EligibilityArgs};
use mdl_cli::quote::{run_quote, QuoteArgs};
use mdl_cli::CliContext;

/// Municipal driver-license rules: validity, fees, eligibility and expiry.
#[derive(Parser, Debug)]
#[command(name = "mdl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Rulebook file (.yaml, .yml or .json) replacing the built-in tables.
    #[arg(long, global = true)]
    rulebook: Option<PathBuf>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validity period for an age.
    Validity(ValidityArgs),

    /// Itemized fee for a class and validity period.
    Fee(FeeArgs),

    /// Check whether an age and license history qualify for a class.
    Eligibility(EligibilityArgs),

    /// Expiration date for a birth date and validity period.
    Expiration(ExpirationArgs),

    /// Quote an original, renewal or duplicate for a holder file.
    Quote(QuoteArgs),

    /// List license classes.
    Classes(ClassesArgs),

    /// Print the active rulebook.
    Rulebook,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("mdl CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = CliContext::load(cli.rulebook.as_deref(), cli.json).and_then(|ctx| {
        match &cli.command {
            Commands::Validity(args) => run_validity(args, &ctx),
            Commands::Fee(args) => run_fee(args, &ctx),
            Commands::Eligibility(args) => run_eligibility(args, &ctx),
            Commands::Expiration(args) => run_expiration(args, &ctx),
            Commands::Quote(args) => run_quote(args, &ctx),
            Commands::Classes(args) => run_classes(args, &ctx),
            Commands::Rulebook => run_rulebook(&ctx),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

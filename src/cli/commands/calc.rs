//! `chy calc` command - Recalculate every sample
//!
//! Runs the full validation pass, writes the yields back to the sheet and
//! reports the last validation error. `--all-errors` lists every failing
//! row instead.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_collection, save_collection};
use crate::cli::commands::show::resolve_format;
use crate::cli::table::render;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct CalcArgs {
    /// Sheet to recalculate
    pub file: PathBuf,

    /// List every failing sample instead of only the last one
    #[arg(long)]
    pub all_errors: bool,

    /// Exit with an error if any sample fails validation
    #[arg(long)]
    pub strict: bool,

    /// Calculate and report without writing the sheet
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: CalcArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut collection = load_collection(&args.file, config.prefix())?;

    let report = collection.recalculate_all();
    if !args.dry_run {
        save_collection(&collection, &args.file)?;
    }

    if !global.quiet {
        let format = resolve_format(global, &config);
        print!("{}", render(collection.records(), format)?);
        println!();
        println!(
            "  Calculated: {}   Incomplete: {}   Errors: {}",
            style(report.computed).green(),
            style(report.incomplete).dim(),
            if report.has_errors() {
                style(report.errors.len()).red()
            } else {
                style(report.errors.len()).dim()
            }
        );
    }

    if args.all_errors {
        for (index, error) in &report.errors {
            let name = collection
                .get(*index)
                .map(|r| r.name.as_str())
                .unwrap_or_default();
            eprintln!(
                "{} Row {} ({}): {}",
                style("✗").red(),
                index + 1,
                name,
                error
            );
        }
    } else if let Some(message) = collection.last_error_message() {
        eprintln!("{} {}", style("✗").red(), message);
    }

    if args.dry_run && !global.quiet {
        println!();
        println!("{}", style("Dry run complete. The sheet was not modified.").yellow());
    }

    if args.strict {
        if let Some(error) = collection.last_error() {
            return Err(miette::miette!(
                "Validation failed for {} sample(s): {}",
                report.errors.len(),
                error
            ));
        }
    }

    Ok(())
}

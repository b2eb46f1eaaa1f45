//! `chy set` command - Edit one field of a sample
//!
//! Editing a weight recalculates that sample's yield. Invalid input only
//! clears the yield; run `chy calc` to see why.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{describe_row_error, load_collection, row_index, save_collection};
use crate::cli::GlobalOpts;
use crate::core::{Config, Outcome};
use crate::entities::sample::Field;

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Sheet to edit
    pub file: PathBuf,

    /// Sample row (1-based, as shown by `chy show`)
    pub row: usize,

    /// Field to set (name, crucible-number, crucible, sample, ash)
    pub field: Field,

    /// New value (empty string clears the field)
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

pub fn run(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut collection = load_collection(&args.file, config.prefix())?;

    let index = row_index(args.row)?;
    let outcome = collection
        .update(index, args.field, args.value.as_str())
        .map_err(describe_row_error)?;
    save_collection(&collection, &args.file)?;

    if global.quiet {
        return Ok(());
    }

    let name = collection
        .get(index)
        .map(|r| r.name.as_str())
        .unwrap_or_default();
    match outcome {
        None => println!(
            "{} Row {}: Set {} of {}",
            style("✓").green(),
            args.row,
            args.field,
            style(name).cyan()
        ),
        Some(Outcome::Ok(value)) => println!(
            "{} Row {}: {} char yield {}",
            style("✓").green(),
            args.row,
            style(name).cyan(),
            style(format!("{:.2}%", value)).green()
        ),
        Some(Outcome::Incomplete) => println!(
            "{} Row {}: {} waiting for all three weights",
            style("→").blue(),
            args.row,
            style(name).cyan()
        ),
        Some(Outcome::Error(_)) => println!(
            "{} Row {}: {} yield not calculated (run `chy calc` for details)",
            style("○").dim(),
            args.row,
            style(name).cyan()
        ),
    }

    Ok(())
}

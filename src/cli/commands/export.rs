//! `chy export` command - Convert a sheet to CSV or xlsx

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_collection, save_collection};
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Sheet to read (.csv, .xlsx, .xls, .ods)
    pub file: PathBuf,

    /// Output file; the extension picks the format (.xlsx, otherwise CSV)
    pub output: PathBuf,

    /// Overwrite the output file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(miette::miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            args.output.display()
        ));
    }

    let config = Config::load();
    let collection = load_collection(&args.file, config.prefix())?;
    let format = save_collection(&collection, &args.output)?;

    if !global.quiet {
        println!(
            "{} Exported {} sample(s) to {} ({})",
            style("✓").green(),
            style(collection.len()).cyan(),
            style(args.output.display()).yellow(),
            format
        );
    }

    Ok(())
}

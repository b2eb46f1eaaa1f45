//! `chy new` command - Create a new sample sheet

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::save_collection;
use crate::cli::GlobalOpts;
use crate::core::{Config, SampleCollection};

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Sheet to create (.csv or .xlsx)
    pub file: PathBuf,

    /// Number of empty samples to start with
    #[arg(long, short = 'n', default_value_t = 1)]
    pub samples: usize,

    /// Name prefix for the samples (default: config `default_prefix`, else "Sample")
    #[arg(long)]
    pub prefix: Option<String>,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    if args.file.exists() && !args.force {
        return Err(miette::miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            args.file.display()
        ));
    }

    let config = Config::load();
    let prefix = args.prefix.as_deref().unwrap_or(config.prefix());
    let collection = SampleCollection::with_samples(prefix, args.samples);
    let format = save_collection(&collection, &args.file)?;

    if !global.quiet {
        println!(
            "{} Created {} with {} sample(s) ({})",
            style("✓").green(),
            style(args.file.display()).yellow(),
            style(collection.len()).cyan(),
            format
        );
    }

    Ok(())
}

//! `chy add` command - Append empty samples to a sheet

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_collection, save_collection};
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Sheet to append to
    pub file: PathBuf,

    /// Number of samples to add
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Name prefix for the new samples (default: config `default_prefix`, else "Sample")
    #[arg(long)]
    pub prefix: Option<String>,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let prefix = args.prefix.as_deref().unwrap_or(config.prefix());

    let mut collection = load_collection(&args.file, config.prefix())?;
    let mut added = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        added.push(collection.append(prefix).name.clone());
    }
    save_collection(&collection, &args.file)?;

    if !global.quiet {
        for (offset, name) in added.iter().enumerate() {
            let row = collection.len() - added.len() + offset + 1;
            println!(
                "{} Row {}: Added {}",
                style("✓").green(),
                row,
                style(name).cyan()
            );
        }
    }

    Ok(())
}

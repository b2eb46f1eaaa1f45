//! `chy show` command - Display the samples in a sheet

use clap::ValueEnum;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_collection;
use crate::cli::table::render;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Sheet to display (.csv, .xlsx, .xls, .ods)
    pub file: PathBuf,

    /// Show only the number of samples
    #[arg(long)]
    pub count: bool,
}

/// Resolve the output format: flag, then config, then auto
pub(crate) fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| OutputFormat::from_str(f, true).ok())
        })
        .unwrap_or_default()
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let collection = load_collection(&args.file, config.prefix())?;

    if args.count {
        println!("{}", collection.len());
        return Ok(());
    }

    let format = resolve_format(global, &config);
    print!("{}", render(collection.records(), format)?);

    Ok(())
}

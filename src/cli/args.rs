//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    add::AddArgs, calc::CalcArgs, completions::CompletionsArgs, export::ExportArgs,
    new::NewArgs, set::SetArgs, show::ShowArgs, template::TemplateArgs,
};

#[derive(Parser)]
#[command(name = "chy")]
#[command(author, version, about = "Char Yield Toolkit")]
#[command(long_about = "Record crucible, sample and ash weighings, compute char yield, and keep the results in a CSV or Excel sheet.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format (default: config `default_format`, else auto)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Do not show the first-run guide
    #[arg(long, global = true)]
    pub no_guide: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new sample sheet
    New(NewArgs),

    /// Append empty samples to a sheet
    Add(AddArgs),

    /// Set one field of a sample (weights recalculate that sample's yield)
    Set(SetArgs),

    /// Recalculate every sample's yield and report validation errors
    Calc(CalcArgs),

    /// Show the samples in a sheet
    Show(ShowArgs),

    /// Convert a sheet to another format (.csv or .xlsx)
    Export(ExportArgs),

    /// Print an import template (CSV) to stdout
    Template(TemplateArgs),

    /// Show the usage guide and yield formula
    Guide,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format, same layout as an exported sheet
    Csv,
    /// Markdown table
    Md,
}

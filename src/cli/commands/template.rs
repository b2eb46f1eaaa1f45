//! `chy template` command - Print an import template

use console::style;
use miette::Result;

use crate::cli::table::template_headers;

#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    /// Include an example row
    #[arg(long)]
    pub example: bool,
}

const EXAMPLE_ROW: [&str; 6] = ["\"Pine bark\"", "C-07", "10.00", "5.00", "11.50", ""];

pub fn run(args: TemplateArgs) -> Result<()> {
    // Output to stdout (can be redirected to file)
    println!("{}", template_headers().join(","));
    if args.example {
        println!("{}", EXAMPLE_ROW.join(","));
    }

    // Print usage hint to stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: chy template > samples.csv",
        style("→").blue()
    );

    Ok(())
}

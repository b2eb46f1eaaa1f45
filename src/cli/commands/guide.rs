//! `chy guide` command - Show the usage guide on demand

use miette::Result;

use crate::cli::guide::format_guide;
use crate::core::guide::guidance;

pub fn run() -> Result<()> {
    if let Some(steps) = guidance(false) {
        print!("{}", format_guide(steps));
    }
    Ok(())
}

//! Usage guidance
//!
//! Whether guidance has already been shown is the caller's business; the
//! caller passes `suppress` and gets the text back when it should be shown.

/// Formula as shown to the user
pub const FORMULA: &str =
    "Char Yield (%) = [(Ash Weight - Crucible Weight) / Sample Weight] x 100";

/// Step-by-step usage guide
pub const GUIDE_STEPS: &[&str] = &[
    "Enter each sample's crucible, sample and ash weights (g); the yield is filled in as soon as all three are valid.",
    "Run a full calculation to recompute every sample and see the last validation error, if any.",
    "Import samples from a CSV or Excel sheet with the columns: Sample Name, Crucible Number, Crucible Weight, Sample Weight, Ash Weight, Char Yield.",
    "Export the results as CSV or Excel (.xlsx).",
];

/// Guide lines to show, or `None` when suppressed
pub fn guidance(suppress: bool) -> Option<&'static [&'static str]> {
    (!suppress).then_some(GUIDE_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guidance_suppression() {
        assert_eq!(guidance(false).map(|g| g.len()), Some(4));
        assert!(guidance(true).is_none());
    }
}

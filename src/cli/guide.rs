//! First-run guide
//!
//! A marker file in the user data directory records that the guide has been
//! shown. The marker is never read by the core; it only decides the
//! `suppress` flag handed to [`crate::core::guide::guidance`].

use console::style;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::guide::{self, FORMULA};
use crate::core::Config;

const MARKER_FILE: &str = "guide_seen";

/// Persisted "guide seen" flag
#[derive(Debug)]
pub struct GuideMarker {
    path: PathBuf,
}

impl GuideMarker {
    /// Marker in the platform data directory (~/.local/share/chy on Linux)
    pub fn default_location() -> Option<Self> {
        directories::ProjectDirs::from("", "", "chy").map(|dirs| Self {
            path: dirs.data_dir().join(MARKER_FILE),
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_seen(&self) -> bool {
        self.path.exists()
    }

    pub fn mark_seen(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "seen\n")
    }
}

/// Format the guide for display
pub fn format_guide(steps: &[&str]) -> String {
    let mut out = format!("{}\n", style("Quick guide").bold());
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step));
    }
    out.push('\n');
    out.push_str(&format!("  {}\n", style(FORMULA).cyan()));
    out
}

/// Show the guide on stderr the first time the tool runs
pub fn show_on_first_run(global: &GlobalOpts, config: &Config) {
    let Some(marker) = GuideMarker::default_location() else {
        return;
    };
    show_once(&marker, global.no_guide || global.quiet || !config.show_guide());
}

fn show_once(marker: &GuideMarker, suppress: bool) -> bool {
    let Some(steps) = guide::guidance(suppress || marker.is_seen()) else {
        return false;
    };

    eprintln!("{}", format_guide(steps));
    if let Err(e) = marker.mark_seen() {
        tracing::warn!(path = %marker.path().display(), error = %e, "could not record that the guide was shown");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_guide_shown_once() {
        let dir = tempdir().unwrap();
        let marker = GuideMarker::at(dir.path().join("nested/guide_seen"));

        assert!(!marker.is_seen());
        assert!(show_once(&marker, false));
        assert!(marker.is_seen());
        assert!(!show_once(&marker, false));
    }

    #[test]
    fn test_suppressed_guide_leaves_marker_alone() {
        let dir = tempdir().unwrap();
        let marker = GuideMarker::at(dir.path().join("guide_seen"));

        assert!(!show_once(&marker, true));
        assert!(!marker.is_seen());
    }

    #[test]
    fn test_format_guide_numbers_steps() {
        let text = format_guide(&["first", "second"]);
        assert!(text.contains("1. first"));
        assert!(text.contains("2. second"));
        assert!(text.contains("Char Yield (%)"));
    }
}

//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::entities::sample::DEFAULT_NAME_PREFIX;

/// CHY configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for generated sample names ("Sample" → "Sample 1")
    pub default_prefix: Option<String>,

    /// Default output format for `chy show`
    pub default_format: Option<String>,

    /// Show the usage guide on first run
    pub show_guide: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/chy/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Parse a config file, `None` if it is missing or invalid
    pub fn load_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Read overrides from `CHY_PREFIX`, `CHY_FORMAT` and `CHY_NO_GUIDE`
    fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        Config {
            default_prefix: var("CHY_PREFIX").filter(|s| !s.trim().is_empty()),
            default_format: var("CHY_FORMAT").filter(|s| !s.trim().is_empty()),
            show_guide: var("CHY_NO_GUIDE").map(|v| matches!(v.trim(), "" | "0" | "false")),
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "chy")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_prefix.is_some() {
            self.default_prefix = other.default_prefix;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.show_guide.is_some() {
            self.show_guide = other.show_guide;
        }
    }

    /// Name prefix for new samples
    pub fn prefix(&self) -> &str {
        self.default_prefix.as_deref().unwrap_or(DEFAULT_NAME_PREFIX)
    }

    pub fn show_guide(&self) -> bool {
        self.show_guide.unwrap_or(true)
    }
}

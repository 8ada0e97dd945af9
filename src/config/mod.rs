//! Configuration loading and management.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportConfig,
}

/// Report sizing knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Row cap for the per-type and LOH tables.
    pub top_types: usize,
    /// Row cap for the string tables.
    pub top_strings: usize,
    /// Character cap on displayed string values; longer ones are truncated
    /// with an ellipsis.
    pub string_preview: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_types: 100,
            top_strings: 100,
            string_preview: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from an explicit TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Load `snaplens.toml` from `dir` if present, defaults otherwise.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let candidate = dir.as_ref().join("snaplens.toml");
        if candidate.exists() {
            return Self::from_file(candidate);
        }
        Ok(Self::default())
    }
}

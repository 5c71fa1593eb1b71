//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stixmap_core::limits::validate_capacity;
use stixmap_core::MAX_TRANSIENT_STIX_IDS;

use crate::output::OutputFormat;

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stixmap")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transient ids kept by `clean-ids` when no capacity is given
    pub default_capacity: usize,
    /// Output format when `--format` is not given
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_capacity: MAX_TRANSIENT_STIX_IDS,
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["default_capacity", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_capacity" => Some(self.default_capacity.to_string()),
            "format" => Some(self.format.as_str().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "default_capacity" => {
                let capacity: usize = value
                    .parse()
                    .with_context(|| format!("Invalid capacity: {}", value))?;
                validate_capacity(capacity)?;
                self.default_capacity = capacity;
            }
            "format" => self.format = value.parse()?,
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        Ok(())
    }
}

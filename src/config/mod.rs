//! Configuration loading and management

mod io;
mod settings;

pub use settings::{OutputSettings, SourceSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Program directory and GraphQL endpoint settings
    #[serde(default)]
    pub source: SourceSettings,

    /// Where and how result files are written
    #[serde(default)]
    pub output: OutputSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the explicitly given config, else the global one, else defaults.
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_override {
            return Self::from_file(path);
        }

        let global_path = Self::global_config_path();
        if global_path.exists() {
            tracing::debug!("Loading config from {}", global_path.display());
            return Self::from_file(&global_path);
        }

        Ok(Self::default())
    }
}

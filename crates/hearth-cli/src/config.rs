//! Configuration file management.
//!
//! Credentials and preferences live in a TOML file under the platform
//! config dir. Tokens rotate on every run, so the file is rewritten often;
//! `save` keeps that cheap and explicit.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API key of the registered application
    #[serde(default)]
    pub api_key: String,

    /// Application pin issued during setup
    #[serde(default)]
    pub pin: String,

    /// Authorization code matching the pin
    #[serde(default)]
    pub auth_code: String,

    /// Current access token (rotated every run)
    #[serde(default)]
    pub access_token: String,

    /// Current refresh token (rotated every run)
    #[serde(default)]
    pub refresh_token: String,

    /// Registered thermostat identifiers (refreshed every run)
    #[serde(default)]
    pub thermostat_ids: Vec<String>,

    /// Where the history CSV lives; defaults to the platform data dir
    #[serde(default)]
    pub csv_location: Option<PathBuf>,
}

impl Config {
    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hearth")
            .join("config.toml")
    }

    /// Load the config, failing with a hint to run setup if it is missing.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read config at {}, run `hearth setup` first",
                path.display()
            )
        })?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))
    }

    /// Load the config if present, otherwise start from defaults (setup).
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Do we hold a token pair from a completed setup?
    pub fn is_authorized(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    /// The CSV location, falling back to the platform default.
    pub fn csv_path(&self) -> PathBuf {
        self.csv_location
            .clone()
            .unwrap_or_else(hearth_store::default_csv_path)
    }
}

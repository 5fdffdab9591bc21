//! Configuration management for equity ingestion.
//!
//! Loads configuration from TOML files. Every section falls back to defaults,
//! so an empty file is a valid configuration.

use equity_core::{IfExists, OutputSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./equity.toml`
    /// 2. `~/.config/equity-ingest/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load(Self::default_path()) {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("equity-ingest").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("equity.toml")
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host serving the `/query` endpoint.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Output size used when the caller does not pick one.
    pub default_output_size: OutputSize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://learn-api.wqu.edu/1/data-services/alpha-vantage".to_string(),
            api_key_env: "alpha_vantage".to_string(),
            default_output_size: OutputSize::Full,
        }
    }
}

impl ApiConfig {
    /// Resolve the API key through `lookup`, usually `|k| std::env::var(k).ok()`.
    ///
    /// Blank values count as missing.
    pub fn api_key_from<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.api_key_env).filter(|key| !key.trim().is_empty())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the DuckDB database file.
    /// Defaults to ~/.local/share/equity-ingest/stocks.duckdb
    pub db_path: Option<PathBuf>,
    /// Conflict policy used when the caller does not pick one.
    pub default_if_exists: IfExists,
}

impl StorageConfig {
    /// Get the database path, using default if not specified.
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("equity-ingest")
                .join("stocks.duckdb")
        })
    }
}

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::analysis::phrases::DEFAULT_MIN_COUNT;
use crate::analysis::OutputFormat;
use crate::database::DatabaseConnection;
use crate::errors::AppError;

/// Application configuration module
/// This module handles loading and validating the analyzer settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the translation database; the per-user data directory when unset
    #[serde(default)]
    pub database_path: Option<String>,

    /// Minimum occurrence count for phrase mining
    #[serde(default = "default_min_count")]
    pub min_count: usize,

    /// Report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_min_count() -> usize {
    DEFAULT_MIN_COUNT
}

impl Config {
    /// Load a configuration file; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_count == 0 {
            return Err(AppError::Config("min_count must be at least 1".to_string()));
        }

        if let Some(path) = &self.database_path {
            if path.trim().is_empty() {
                return Err(AppError::Config("database_path must not be empty".to_string()));
            }
        }

        Ok(())
    }

    /// The configured database path, or the default file in the user data directory.
    pub fn resolved_database_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.database_path {
            return Ok(PathBuf::from(path));
        }

        DatabaseConnection::default_database_path()
            .map_err(|e| AppError::Config(format!("{:#}", e)))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: None,
            min_count: default_min_count(),
            format: OutputFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}

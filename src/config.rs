//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::ClassCode;
use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub flow: FlowConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConfig {
    #[serde(default = "default_source")]
    pub source: String,

    /// Premade dataset used when the CLI supplies no metadata
    pub dataset: Option<String>,

    #[serde(default = "default_theme")]
    pub theme: String,
}

/// Flow diagram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Class codes removed from every diagram
    #[serde(default)]
    pub exclude: Vec<ClassCode>,

    /// Cap on the number of classes kept
    pub max_classes: Option<usize>,

    /// Drop rows with missing values before aggregation
    #[serde(default = "default_dropna")]
    pub dropna: bool,

    /// Number of rows requested from sampling sources
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Seed forwarded to sampling sources
    #[serde(default)]
    pub seed: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

// Default value functions

fn default_source() -> String {
    "mock".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_dropna() -> bool {
    true
}

fn default_samples() -> usize {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for DefaultConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            dataset: None,
            theme: default_theme(),
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            max_classes: None,
            dropna: default_dropna(),
            samples: default_samples(),
            seed: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./config.toml
    /// 2. ~/.landcover-flow-viz/config.toml
    /// 3. /etc/landcover-flow-viz/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("config.toml"),
            dirs::home_dir()
                .map(|h| h.join(".landcover-flow-viz").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
            PathBuf::from("/etc/landcover-flow-viz/config.toml"),
        ];

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

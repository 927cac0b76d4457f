//! This module defines all error types used throughout the application.

use std::io;

use thiserror::Error;

use crate::catalog::ClassCode;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A class code observed in the data has no label or color
    #[error("The following values are present in the data and undefined in the {table}: {missing:?}")]
    MissingMetadata {
        table: &'static str,
        missing: Vec<ClassCode>,
    },

    /// Malformed sample table (ragged rows, too few steps)
    #[error("Schema error: {0}")]
    Schema(String),

    /// Aggregation produced zero edges
    #[error("No valid transitions remain; the diagram would be empty")]
    EmptyGraph,

    /// Contradictory configuration
    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),

    /// Data source errors
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a schema error
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a configuration-conflict error
    pub fn config_conflict(msg: impl Into<String>) -> Self {
        Self::ConfigConflict(msg.into())
    }

    /// Create a data source error
    pub fn data_source(msg: impl Into<String>) -> Self {
        Self::DataSource(msg.into())
    }

    /// Create an error for codes with no label metadata
    pub fn missing_labels(missing: Vec<ClassCode>) -> Self {
        Self::MissingMetadata {
            table: "labels",
            missing,
        }
    }

    /// Create an error for codes with no color metadata
    pub fn missing_palette(missing: Vec<ClassCode>) -> Self {
        Self::MissingMetadata {
            table: "palette",
            missing,
        }
    }
}

// Implement From traits for common external error types

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DataSource(format!("JSON error: {}", err))
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::schema("rows have inconsistent lengths");
        assert_eq!(
            err.to_string(),
            "Schema error: rows have inconsistent lengths"
        );
    }

    #[test]
    fn test_error_macros() {
        fn check(flag: bool) -> Result<u32> {
            crate::ensure!(flag, "flag was {}", flag);
            Ok(1)
        }

        assert_eq!(check(true).unwrap(), 1);
        let err = check(false).unwrap_err();
        assert_eq!(err.to_string(), "flag was false");
    }

    #[test]
    fn test_missing_metadata_message() {
        let err = Error::missing_labels(vec![3, 7]);
        assert_eq!(
            err.to_string(),
            "The following values are present in the data and undefined in the labels: [3, 7]"
        );
    }
}

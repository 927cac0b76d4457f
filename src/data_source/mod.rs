//! Data source module - Abstraction for acquiring classified sample tables
//!
//! This module provides a trait-based abstraction for acquiring the N-rows by
//! T-steps sample table the pipeline consumes. Real sampling happens in an
//! external geospatial service; the sources here load its exported output
//! from disk or generate synthetic samples for demos and tests.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::cli::SourceType;
use crate::{Error, Result};

pub mod file;
pub mod mock;
pub mod models;

pub use models::{SampleRow, SampleTable};

/// Query parameters for sample acquisition
///
/// `n` and `seed` apply only to sampling sources; file-backed sources return
/// the table as exported.
#[derive(Debug, Clone)]
pub struct SampleQuery {
    /// Number of sample rows to generate
    pub n: usize,
    /// Seed for reproducible sample generation
    pub seed: u64,
    /// Step labels to assign (e.g. years); sources may carry their own
    pub step_labels: Option<Vec<String>>,
}

impl Default for SampleQuery {
    fn default() -> Self {
        Self {
            n: 500,
            seed: 0,
            step_labels: None,
        }
    }
}

impl SampleQuery {
    pub fn n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn step_labels(mut self, labels: Vec<String>) -> Self {
        self.step_labels = Some(labels);
        self
    }
}

/// Data source trait for acquiring sample tables
///
/// Implementations provide different backends:
/// - `FileDataSource`: loads a table exported by an external sampler
/// - `MockDataSource`: generates deterministic synthetic data
#[async_trait]
pub trait DataSource: Send + Sync + std::fmt::Debug {
    /// Acquire a validated sample table
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SampleTable>;
}

/// Create a data source instance based on type and CLI arguments
pub fn create_data_source(
    source_type: SourceType,
    input: Option<PathBuf>,
) -> Result<Box<dyn DataSource>> {
    match source_type {
        SourceType::Mock => Ok(Box::new(mock::MockDataSource::new())),
        SourceType::File => {
            let path = input.ok_or_else(|| {
                Error::config_conflict("--input is required when --source is file")
            })?;
            Ok(Box::new(file::FileDataSource::new(path)))
        }
    }
}

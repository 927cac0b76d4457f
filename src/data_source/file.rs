//! File-backed data source
//!
//! Loads a sample table exported by an external sampler as JSON:
//!
//! ```json
//! {
//!   "step_labels": ["1985", "2010"],
//!   "rows": [[1, 2], [3, null]]
//! }
//! ```
//!
//! `step_labels` is optional; `null` cells are missing observations.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use crate::catalog::ClassCode;
use crate::data_source::{DataSource, SampleQuery, SampleRow, SampleTable};
use crate::{Error, Result};

/// Data source reading an exported sample table from a JSON file
#[derive(Debug)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// On-disk representation of an exported sample table
#[derive(Debug, Deserialize)]
struct RawSampleTable {
    #[serde(default)]
    step_labels: Option<Vec<String>>,
    rows: Vec<Vec<Option<ClassCode>>>,
}

#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SampleTable> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::data_source(format!("Failed to read sample file {:?}: {}", self.path, e))
        })?;

        let raw: RawSampleTable = serde_json::from_str(&contents).map_err(|e| {
            Error::data_source(format!("Failed to parse sample file {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Loaded {} sample rows from {:?}", raw.rows.len(), self.path);

        // Labels supplied on the query override labels stored in the file
        let step_labels = query.step_labels.clone().or(raw.step_labels);
        let rows = raw.rows.into_iter().map(SampleRow::new).collect();

        SampleTable::new(rows, step_labels)
    }
}

//! Mock data source for testing and development
//!
//! Generates a synthetic classified time series over the LCMS land use
//! classes. Rows drift between classes with a bias toward development, and a
//! small fraction of cells is left missing so dropna handling can be
//! exercised. Generation is fully determined by the query seed.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::catalog::ClassCode;
use crate::data_source::{DataSource, SampleQuery, SampleRow, SampleTable};
use crate::Result;

/// Classes emitted by the mock sampler (LCMS land use, nodata excluded)
const MOCK_CLASSES: [ClassCode; 5] = [1, 2, 3, 4, 5];

/// Developed: classes drift toward it and never leave it
const DEVELOPED: ClassCode = 2;

/// Per-cell chance (percent) of a missing observation
const MISSING_PCT: u32 = 3;

/// Mock data source generating seeded synthetic samples
#[derive(Debug)]
pub struct MockDataSource;

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataSource {
    pub fn new() -> Self {
        Self
    }

    fn next_class(rng: &mut StdRng, current: ClassCode) -> ClassCode {
        if current == DEVELOPED {
            return DEVELOPED;
        }
        match rng.random_range(0..100u32) {
            // Mostly stable
            0..=79 => current,
            // Urbanization
            80..=91 => DEVELOPED,
            // Drift to a random other class
            _ => {
                let idx = rng.random_range(0..MOCK_CLASSES.len());
                MOCK_CLASSES[idx]
            }
        }
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_samples(&self, query: &SampleQuery) -> Result<SampleTable> {
        crate::ensure!(query.n > 0, "sample count must be positive");

        let step_count = query.step_labels.as_ref().map(|l| l.len()).unwrap_or(3);
        let mut rng = StdRng::seed_from_u64(query.seed);

        tracing::debug!(
            "Generating {} mock samples across {} steps (seed {})",
            query.n,
            step_count,
            query.seed
        );

        let mut rows = Vec::with_capacity(query.n);
        for _ in 0..query.n {
            let mut values = Vec::with_capacity(step_count);
            let mut current = MOCK_CLASSES[rng.random_range(0..MOCK_CLASSES.len())];
            for step in 0..step_count {
                if step > 0 {
                    current = Self::next_class(&mut rng, current);
                }
                if rng.random_range(0..100u32) < MISSING_PCT {
                    values.push(None);
                } else {
                    values.push(Some(current));
                }
            }
            rows.push(SampleRow::new(values));
        }

        SampleTable::new(rows, query.step_labels.clone())
    }
}

//! Core data models for classified sample tables
//!
//! A sample table holds one row per sampled location and one column per time
//! step. Cells are class codes; a missing cell means the sampler had no class
//! value for that location at that step.

use serde::{Deserialize, Serialize};

use crate::catalog::ClassCode;
use crate::{Error, Result};

/// One sampled location: its class code at each time step, in step order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleRow {
    pub values: Vec<Option<ClassCode>>,
}

impl SampleRow {
    pub fn new(values: Vec<Option<ClassCode>>) -> Self {
        Self { values }
    }

    /// Class code at the given step, if present
    pub fn value(&self, step: usize) -> Option<ClassCode> {
        self.values.get(step).copied().flatten()
    }

    /// True when every step has a class value
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| v.is_some())
    }
}

/// An ordered set of sample rows sharing a fixed step count.
///
/// Invariants enforced at construction: at least two steps (a single step has
/// no transitions to show), every row has exactly one value per step, and
/// step labels are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleTable {
    rows: Vec<SampleRow>,
    step_labels: Vec<String>,
}

impl SampleTable {
    /// Build a validated table.
    ///
    /// When `step_labels` is not supplied, sequential numeric labels starting
    /// at "0" are assigned. An empty row set requires explicit labels, since
    /// the step count cannot be inferred.
    pub fn new(rows: Vec<SampleRow>, step_labels: Option<Vec<String>>) -> Result<Self> {
        let step_count = match (&step_labels, rows.first()) {
            (Some(labels), _) => labels.len(),
            (None, Some(row)) => row.values.len(),
            (None, None) => {
                return Err(Error::schema(
                    "cannot determine step count from an empty table without step labels",
                ));
            }
        };

        if step_count < 2 {
            return Err(Error::schema(format!(
                "at least two time steps are required, got {}",
                step_count
            )));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != step_count {
                return Err(Error::schema(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.values.len(),
                    step_count
                )));
            }
        }

        let step_labels =
            step_labels.unwrap_or_else(|| (0..step_count).map(|i| i.to_string()).collect());

        let mut seen = std::collections::HashSet::new();
        for label in &step_labels {
            if !seen.insert(label) {
                return Err(Error::schema(format!("duplicate step label: {:?}", label)));
            }
        }

        Ok(Self { rows, step_labels })
    }

    pub fn step_count(&self) -> usize {
        self.step_labels.len()
    }

    pub fn step_labels(&self) -> &[String] {
        &self.step_labels
    }

    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    /// Number of sample rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All distinct class codes present in any cell, ascending
    pub fn observed_codes(&self) -> Vec<ClassCode> {
        let mut codes: Vec<ClassCode> = self
            .rows
            .iter()
            .flat_map(|row| row.values.iter().copied().flatten())
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// A copy of this table without rows that have any missing value
    pub fn drop_incomplete(&self) -> SampleTable {
        SampleTable {
            rows: self.rows.iter().filter(|r| r.is_complete()).cloned().collect(),
            step_labels: self.step_labels.clone(),
        }
    }

    /// A copy of this table with every present cell passed through `f`.
    ///
    /// Returning `None` blanks the cell; the row itself is never removed.
    pub fn map_values(&self, f: impl Fn(ClassCode) -> Option<ClassCode>) -> SampleTable {
        SampleTable {
            rows: self
                .rows
                .iter()
                .map(|row| SampleRow::new(row.values.iter().map(|v| v.and_then(&f)).collect()))
                .collect(),
            step_labels: self.step_labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[Option<ClassCode>]]) -> Vec<SampleRow> {
        data.iter().map(|r| SampleRow::new(r.to_vec())).collect()
    }

    #[test]
    fn test_default_step_labels() {
        let table = SampleTable::new(
            rows(&[&[Some(1), Some(2), Some(1)]]),
            None,
        )
        .unwrap();
        assert_eq!(table.step_labels(), &["0", "1", "2"]);
        assert_eq!(table.step_count(), 3);
    }

    #[test]
    fn test_rejects_single_step() {
        let err = SampleTable::new(rows(&[&[Some(1)]]), None).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = SampleTable::new(
            rows(&[&[Some(1), Some(2)], &[Some(1)]]),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_rejects_duplicate_step_labels() {
        let err = SampleTable::new(
            rows(&[&[Some(1), Some(2)]]),
            Some(vec!["2010".to_string(), "2010".to_string()]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_rejects_empty_table_without_labels() {
        assert!(SampleTable::new(vec![], None).is_err());
        assert!(
            SampleTable::new(vec![], Some(vec!["a".to_string(), "b".to_string()])).is_ok()
        );
    }

    #[test]
    fn test_observed_codes() {
        let table = SampleTable::new(
            rows(&[&[Some(3), None], &[Some(1), Some(3)]]),
            None,
        )
        .unwrap();
        assert_eq!(table.observed_codes(), vec![1, 3]);
    }

    #[test]
    fn test_drop_incomplete() {
        let table = SampleTable::new(
            rows(&[&[Some(1), None], &[Some(1), Some(2)]]),
            None,
        )
        .unwrap();
        let complete = table.drop_incomplete();
        assert_eq!(complete.len(), 1);
        assert_eq!(complete.rows()[0].value(1), Some(2));
    }

    #[test]
    fn test_map_values_blanks_cells_not_rows() {
        let table = SampleTable::new(
            rows(&[&[Some(1), Some(2)], &[Some(2), Some(2)]]),
            None,
        )
        .unwrap();
        let masked = table.map_values(|code| (code != 2).then_some(code));

        assert_eq!(masked.len(), 2);
        assert_eq!(masked.rows()[0].value(0), Some(1));
        assert_eq!(masked.rows()[0].value(1), None);
        assert!(!masked.rows()[1].is_complete());
    }
}

//! Catalog module - Class metadata for land cover classification schemes
//!
//! This module provides the mapping of class codes to display labels and
//! colors, either from premade dataset tables or from user-supplied metadata
//! files. Catalog data is read-only and passed to the pipeline as explicit
//! arguments.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub mod datasets;
pub mod registry;

pub use registry::{Category, CategoryRegistry, duplicate_class_remap};

/// Integer code identifying a classified value (e.g. a land cover class ID)
pub type ClassCode = u32;

/// A premade land cover classification scheme.
///
/// Carries the metadata needed to plot samples from a published dataset:
/// class labels, class colors, the years the dataset covers, and an optional
/// nodata code that is stripped before plotting.
#[derive(Debug, Clone, Copy)]
pub struct Dataset {
    /// Short name used to select the dataset from the CLI
    pub key: &'static str,
    pub name: &'static str,
    /// Identifier of the source image collection
    pub id: &'static str,
    /// Name of the image band that contains class values
    pub band: &'static str,
    pub labels: &'static [(ClassCode, &'static str)],
    pub palette: &'static [(ClassCode, &'static str)],
    pub years: &'static [u16],
    pub nodata: Option<ClassCode>,
}

impl Dataset {
    /// All premade datasets
    pub fn all() -> &'static [Dataset] {
        datasets::ALL
    }

    /// Look up a premade dataset by its CLI key
    pub fn find(key: &str) -> Option<&'static Dataset> {
        datasets::ALL.iter().find(|d| d.key == key)
    }

    /// Class labels as an owned map, with the nodata code stripped
    pub fn labels_map(&self) -> HashMap<ClassCode, String> {
        self.labels
            .iter()
            .filter(|(code, _)| Some(*code) != self.nodata)
            .map(|(code, label)| (*code, (*label).to_string()))
            .collect()
    }

    /// Class colors as an owned map, with the nodata code stripped
    pub fn palette_map(&self) -> HashMap<ClassCode, String> {
        self.palette
            .iter()
            .filter(|(code, _)| Some(*code) != self.nodata)
            .map(|(code, color)| (*code, (*color).to_string()))
            .collect()
    }

    /// All class codes defined by this dataset
    pub fn keys(&self) -> Vec<ClassCode> {
        self.labels.iter().map(|(code, _)| *code).collect()
    }
}

/// User-supplied class metadata loaded from a JSON file.
///
/// The file holds two maps keyed by class code: `labels` and `palette`.
/// Both maps must define the same codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataFile {
    pub labels: HashMap<ClassCode, String>,
    pub palette: HashMap<ClassCode, String>,
}

impl MetadataFile {
    /// Load and validate a metadata file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read metadata file {:?}: {}", path, e))
        })?;

        let metadata: MetadataFile = serde_json::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse metadata file {:?}: {}", path, e))
        })?;

        metadata.validate()?;
        Ok(metadata)
    }

    fn validate(&self) -> Result<()> {
        let mut label_keys: Vec<_> = self.labels.keys().copied().collect();
        let mut palette_keys: Vec<_> = self.palette.keys().copied().collect();
        label_keys.sort_unstable();
        palette_keys.sort_unstable();

        if label_keys != palette_keys {
            return Err(Error::Config(
                "Labels and palette must have the same keys.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_dataset() {
        let dataset = Dataset::find("lcms-lu").unwrap();
        assert_eq!(dataset.band, "Land_Use");
        assert!(Dataset::find("no-such-dataset").is_none());
    }

    #[test]
    fn test_nodata_stripped_from_maps() {
        let dataset = Dataset::find("lcms-lu").unwrap();
        assert_eq!(dataset.nodata, Some(6));

        let labels = dataset.labels_map();
        assert!(!labels.contains_key(&6));
        assert_eq!(labels[&3], "Forest");

        let palette = dataset.palette_map();
        assert!(!palette.contains_key(&6));
        assert_eq!(palette[&3], "#1b9d0c");
    }

    #[test]
    fn test_premade_tables_are_consistent() {
        for dataset in Dataset::all() {
            let mut label_keys: Vec<_> = dataset.labels.iter().map(|(c, _)| *c).collect();
            let mut palette_keys: Vec<_> = dataset.palette.iter().map(|(c, _)| *c).collect();
            label_keys.sort_unstable();
            palette_keys.sort_unstable();
            assert_eq!(label_keys, palette_keys, "{}", dataset.key);
            assert!(!dataset.years.is_empty(), "{}", dataset.key);
        }
    }

    #[test]
    fn test_metadata_file_key_mismatch() {
        let metadata = MetadataFile {
            labels: HashMap::from([(1, "Forest".to_string())]),
            palette: HashMap::from([(2, "#1b9d0c".to_string())]),
        };
        assert!(matches!(metadata.validate(), Err(Error::Config(_))));
    }
}

//! Class registry - validated label and color lookup for observed classes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ClassCode;
use crate::{Error, Result};

/// One registered class: code, display label, display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub code: ClassCode,
    pub label: String,
    pub color: String,
}

/// Metadata for the classes actually observed in a sample table.
///
/// Construction validates that every observed code resolves to exactly one
/// label and one color. Metadata for codes that were never observed is
/// dropped so downstream legends only carry classes that occur.
///
/// Categories are held in code-ascending order; the index map gives O(1)
/// lookup by code.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    index: HashMap<ClassCode, usize>,
}

impl CategoryRegistry {
    /// Build a registry for the given observed codes.
    ///
    /// Fails with a metadata error listing every observed code that is
    /// missing from `labels` or `palette`. No default label or color is ever
    /// guessed.
    pub fn build(
        observed: &[ClassCode],
        labels: &HashMap<ClassCode, String>,
        palette: &HashMap<ClassCode, String>,
    ) -> Result<Self> {
        let mut codes: Vec<ClassCode> = observed.to_vec();
        codes.sort_unstable();
        codes.dedup();

        let missing_labels: Vec<ClassCode> = codes
            .iter()
            .copied()
            .filter(|code| !labels.contains_key(code))
            .collect();
        if !missing_labels.is_empty() {
            return Err(Error::missing_labels(missing_labels));
        }

        let missing_palette: Vec<ClassCode> = codes
            .iter()
            .copied()
            .filter(|code| !palette.contains_key(code))
            .collect();
        if !missing_palette.is_empty() {
            return Err(Error::missing_palette(missing_palette));
        }

        let categories: Vec<Category> = codes
            .iter()
            .map(|code| Category {
                code: *code,
                label: labels[code].clone(),
                color: palette[code].clone(),
            })
            .collect();

        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code, i))
            .collect();

        Ok(Self { categories, index })
    }

    pub fn get(&self, code: ClassCode) -> Option<&Category> {
        self.index.get(&code).map(|&i| &self.categories[i])
    }

    pub fn label(&self, code: ClassCode) -> Option<&str> {
        self.get(code).map(|c| c.label.as_str())
    }

    pub fn color(&self, code: ClassCode) -> Option<&str> {
        self.get(code).map(|c| c.color.as_str())
    }

    pub fn contains(&self, code: ClassCode) -> bool {
        self.index.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Registered codes in ascending order
    pub fn codes(&self) -> impl Iterator<Item = ClassCode> + '_ {
        self.categories.iter().map(|c| c.code)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// A copy of this registry reduced to the codes matching `keep`
    pub fn retain(&self, keep: impl Fn(ClassCode) -> bool) -> Self {
        let categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| keep(c.code))
            .cloned()
            .collect();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code, i))
            .collect();
        Self { categories, index }
    }
}

/// Compute the remapping that merges classes with identical label and color.
///
/// Distinct codes that share a (label, color) pair cannot be told apart in
/// the diagram, so they are aggregated before counting. The smallest code
/// carrying a given pair is canonical; every other code with that pair maps
/// onto it. Only non-identity entries are returned.
pub fn duplicate_class_remap(
    labels: &HashMap<ClassCode, String>,
    palette: &HashMap<ClassCode, String>,
) -> HashMap<ClassCode, ClassCode> {
    let mut codes: Vec<ClassCode> = labels
        .keys()
        .copied()
        .filter(|code| palette.contains_key(code))
        .collect();
    codes.sort_unstable();

    let mut canonical: HashMap<(&str, &str), ClassCode> = HashMap::new();
    let mut remap = HashMap::new();

    for code in codes {
        let pair = (labels[&code].as_str(), palette[&code].as_str());
        match canonical.get(&pair) {
            Some(&first) => {
                remap.insert(code, first);
            }
            None => {
                canonical.insert(pair, code);
            }
        }
    }

    remap
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> (HashMap<ClassCode, String>, HashMap<ClassCode, String>) {
        let labels = HashMap::from([
            (1, "Agriculture".to_string()),
            (2, "Developed".to_string()),
            (3, "Forest".to_string()),
        ]);
        let palette = HashMap::from([
            (1, "#efff6b".to_string()),
            (2, "#ff2ff8".to_string()),
            (3, "#1b9d0c".to_string()),
        ]);
        (labels, palette)
    }

    #[test]
    fn test_build_drops_unobserved_codes() {
        let (labels, palette) = metadata();
        let registry = CategoryRegistry::build(&[3, 1, 3], &labels, &palette).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.contains(2));
        assert_eq!(registry.label(1), Some("Agriculture"));
        assert_eq!(registry.color(3), Some("#1b9d0c"));
        // Ascending code order
        let codes: Vec<_> = registry.codes().collect();
        assert_eq!(codes, vec![1, 3]);
    }

    #[test]
    fn test_build_fails_on_missing_label() {
        let (labels, palette) = metadata();
        let err = CategoryRegistry::build(&[1, 9, 7], &labels, &palette).unwrap_err();
        match err {
            Error::MissingMetadata { table, missing } => {
                assert_eq!(table, "labels");
                assert_eq!(missing, vec![7, 9]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_build_fails_on_missing_color() {
        let (labels, mut palette) = metadata();
        palette.remove(&2);
        let err = CategoryRegistry::build(&[1, 2], &labels, &palette).unwrap_err();
        match err {
            Error::MissingMetadata { table, missing } => {
                assert_eq!(table, "palette");
                assert_eq!(missing, vec![2]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_retain() {
        let (labels, palette) = metadata();
        let registry = CategoryRegistry::build(&[1, 2, 3], &labels, &palette).unwrap();
        let reduced = registry.retain(|code| code != 2);

        assert_eq!(reduced.len(), 2);
        assert!(!reduced.contains(2));
        assert_eq!(reduced.label(3), Some("Forest"));
    }

    #[test]
    fn test_duplicate_class_remap() {
        // Codes 2 and 5 share a label and color; 5 maps onto 2
        let labels = HashMap::from([
            (1, "Forest".to_string()),
            (2, "Water".to_string()),
            (5, "Water".to_string()),
        ]);
        let palette = HashMap::from([
            (1, "#1b9d0c".to_string()),
            (2, "#4780f3".to_string()),
            (5, "#4780f3".to_string()),
        ]);

        let remap = duplicate_class_remap(&labels, &palette);
        assert_eq!(remap.len(), 1);
        assert_eq!(remap[&5], 2);
    }

    #[test]
    fn test_same_label_different_color_not_merged() {
        let labels = HashMap::from([(2, "Water".to_string()), (5, "Water".to_string())]);
        let palette = HashMap::from([(2, "#4780f3".to_string()), (5, "#0032c8".to_string())]);

        assert!(duplicate_class_remap(&labels, &palette).is_empty());
    }
}

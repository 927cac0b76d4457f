//! Class consolidation - exclusion and small-class removal
//!
//! Runs between sampling and aggregation. Excluded classes and classes
//! removed by the class cap are blanked out of individual cells; rows are
//! never deleted here, so the remaining steps of an affected row still
//! contribute transitions. A transition with either endpoint blanked is
//! dropped entirely downstream.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog::{CategoryRegistry, ClassCode};
use crate::data_source::SampleTable;
use crate::{Error, Result};

/// Options controlling consolidation and row filtering
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    /// Class codes removed from the diagram
    pub exclude: BTreeSet<ClassCode>,
    /// Keep at most this many classes; smallest classes are removed first
    pub max_classes: Option<usize>,
    /// Drop rows with any missing value before aggregation
    pub dropna: bool,
}

impl Default for ConsolidateOptions {
    fn default() -> Self {
        Self {
            exclude: BTreeSet::new(),
            max_classes: None,
            dropna: true,
        }
    }
}

/// Apply exclusion and the class cap, producing a reduced table and registry.
///
/// Class size is the total occurrence count across the whole table after
/// exclusion. When more than `max_classes` classes survive exclusion, classes
/// are removed smallest first (ties broken by smallest code first) until
/// exactly `max_classes` remain. Removed classes are blanked from the cells
/// where they occur, not merged into an "other" bucket.
pub fn consolidate(
    table: &SampleTable,
    registry: &CategoryRegistry,
    options: &ConsolidateOptions,
) -> Result<(SampleTable, CategoryRegistry)> {
    if options.max_classes == Some(0) {
        return Err(Error::config_conflict("max_classes must be at least 1"));
    }

    let table = if options.exclude.is_empty() {
        table.clone()
    } else {
        tracing::debug!("Excluding classes {:?}", options.exclude);
        table.map_values(|code| (!options.exclude.contains(&code)).then_some(code))
    };

    let mut counts: HashMap<ClassCode, u64> = HashMap::new();
    for row in table.rows() {
        for code in row.values.iter().copied().flatten() {
            *counts.entry(code).or_default() += 1;
        }
    }

    let table = match options.max_classes {
        Some(max) if counts.len() > max => {
            // Ascending occurrence count, then ascending code; the prefix
            // beyond the cap is removed.
            let mut ranked: Vec<(u64, ClassCode)> =
                counts.iter().map(|(code, n)| (*n, *code)).collect();
            ranked.sort_unstable();

            let removed: HashSet<ClassCode> = ranked[..counts.len() - max]
                .iter()
                .map(|(_, code)| *code)
                .collect();
            tracing::debug!("Class cap {} removes {:?}", max, removed);

            table.map_values(|code| (!removed.contains(&code)).then_some(code))
        }
        _ => table,
    };

    let surviving: HashSet<ClassCode> = table.observed_codes().into_iter().collect();
    let registry = registry.retain(|code| surviving.contains(&code));

    Ok((table, registry))
}

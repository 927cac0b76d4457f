//! Sankey module - Consolidate samples, aggregate transitions, assemble the flow graph
//!
//! The pipeline is a chain of pure transformations: each stage consumes an
//! immutable input and produces a new value, and the whole run either returns
//! a complete graph or fails with one of the crate errors. Nothing is retried
//! and no partial result ever escapes.

use std::collections::HashMap;

use crate::catalog::{CategoryRegistry, ClassCode, duplicate_class_remap};
use crate::data_source::SampleTable;
use crate::Result;

pub mod adapter;
pub mod aggregate;
pub mod consolidate;
pub mod graph;
pub mod themes;

// Re-export key types
pub use adapter::{SankeyParameters, to_figure};
pub use aggregate::{TransitionCount, TransitionTable, aggregate};
pub use consolidate::{ConsolidateOptions, consolidate};
pub use graph::{FlowEdge, FlowGraph, FlowNode, GraphStats};
pub use themes::Theme;

/// Run the full pipeline from a sample table to an assembled flow graph.
///
/// Classes sharing an identical label and color are merged first, then rows
/// with missing values are dropped (unless `dropna` is disabled), metadata is
/// validated for every observed class, consolidation applies the exclusion
/// list and class cap, and the surviving transitions are aggregated and
/// assembled into the layered graph.
pub fn build_flow_graph(
    table: &SampleTable,
    labels: &HashMap<ClassCode, String>,
    palette: &HashMap<ClassCode, String>,
    options: &ConsolidateOptions,
) -> Result<FlowGraph> {
    let remap = duplicate_class_remap(labels, palette);
    let table = if remap.is_empty() {
        table.clone()
    } else {
        tracing::debug!("Merging duplicate classes: {:?}", remap);
        table.map_values(|code| Some(remap.get(&code).copied().unwrap_or(code)))
    };

    let table = if options.dropna {
        table.drop_incomplete()
    } else {
        table
    };
    tracing::debug!("{} rows enter consolidation", table.len());

    // Metadata only has to cover the classes the caller intends to keep
    let observed: Vec<ClassCode> = table
        .observed_codes()
        .into_iter()
        .filter(|code| !options.exclude.contains(code))
        .collect();
    let registry = CategoryRegistry::build(&observed, labels, palette)?;
    let (table, registry) = consolidate(&table, &registry, options)?;

    let transitions = aggregate(&table);
    FlowGraph::assemble(&transitions, &registry, table.step_labels())
}

//! Land Cover Flow Visualizer
//!
//! A CLI tool for visualizing land cover class transitions as Sankey flow diagrams.
//!
//! This library provides functionality for:
//! - Loading classified time-series sample tables from multiple sources (files, mock data)
//! - Consolidating classes (exclusion, small-class removal, duplicate merging)
//! - Aggregating per-step class transitions into weighted counts
//! - Assembling transition counts into a layered flow graph
//! - Translating the graph into the parallel arrays a Sankey charting library expects

pub mod catalog;
pub mod cli;
pub mod config;
pub mod data_source;
pub mod error;
pub mod sankey;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::ClassCode;
use crate::{Config, Result};

pub mod commands;
pub mod output;

/// Land Cover Flow Visualizer CLI
#[derive(Parser, Debug)]
#[command(name = "landcover-flow-viz")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "LANDCOVER_FLOW_VIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a Sankey diagram from a classified sample table
    Sankify {
        /// Data source type
        #[arg(short, long, value_enum, default_value = "mock")]
        source: SourceType,

        /// Path to a JSON sample table (required with --source file)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Premade dataset providing class labels and colors
        #[arg(short, long)]
        dataset: Option<String>,

        /// Path to a JSON metadata file providing class labels and colors
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Class codes to exclude from the diagram
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<ClassCode>,

        /// Maximum number of classes to keep; smallest classes are removed first
        #[arg(long)]
        max_classes: Option<usize>,

        /// Keep rows with missing values instead of dropping them
        #[arg(long)]
        keep_na: bool,

        /// Number of sample rows to request (sampling sources only)
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Random seed for sample generation (sampling sources only)
        #[arg(long)]
        seed: Option<u64>,

        /// Step labels, e.g. years ("1985,2000,2015")
        #[arg(long, value_delimiter = ',')]
        steps: Option<Vec<String>>,

        /// Title displayed above the diagram
        #[arg(short, long)]
        title: Option<String>,

        /// Display theme
        #[arg(long)]
        theme: Option<String>,

        /// Node label content
        #[arg(long, value_enum, default_value = "class")]
        label_type: LabelType,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        output: OutputFormat,

        /// Output file (stdout when omitted; html defaults to a timestamped file)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the premade dataset catalog
    Datasets,

    /// Validate that a metadata file covers every class in a sample table
    Validate {
        /// Path to a JSON metadata file
        metadata: PathBuf,

        /// Path to a JSON sample table
        input: PathBuf,
    },
}

/// Data source types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceType {
    /// Deterministic synthetic data
    Mock,
    /// Sample table exported to a JSON file
    File,
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Figure document as JSON
    Json,
    /// Plain text summary
    Table,
    /// Standalone HTML page
    Html,
}

/// Node label content
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LabelType {
    /// Step and class label
    Class,
    /// Share of samples at the step
    Percent,
    /// Sample count
    Count,
    /// No label
    Hidden,
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Sankify { .. } => commands::sankify::execute(args, config).await,
        Commands::Datasets => commands::datasets::execute(),
        Commands::Validate { metadata, input } => {
            commands::validate::execute(metadata, input).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "landcover-flow-viz",
            "sankify",
            "--source",
            "mock",
            "--dataset",
            "lcms-lu",
            "--exclude",
            "4,5",
            "--steps",
            "1985,2010",
        ]);

        assert!(cli.is_ok());
        match cli.unwrap().command {
            Commands::Sankify {
                exclude,
                steps,
                label_type,
                ..
            } => {
                assert_eq!(exclude, vec![4, 5]);
                assert_eq!(
                    steps,
                    Some(vec!["1985".to_string(), "2010".to_string()])
                );
                assert_eq!(label_type, LabelType::Class);
            }
            _ => panic!("expected sankify"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_output() {
        let cli = Cli::try_parse_from([
            "landcover-flow-viz",
            "sankify",
            "--output",
            "svg",
        ]);
        assert!(cli.is_err());
    }
}

//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use std::collections::HashMap;

use crate::catalog::{ClassCode, Dataset, MetadataFile};
use crate::{Config, Error, Result};

/// Resolve class metadata from a dataset name, a metadata file, or the
/// configured fallback dataset. Exactly one source must apply.
fn resolve_metadata(
    dataset: Option<String>,
    metadata: Option<std::path::PathBuf>,
    config: &Config,
) -> Result<(HashMap<ClassCode, String>, HashMap<ClassCode, String>)> {
    match (dataset, metadata) {
        (Some(_), Some(_)) => Err(Error::config_conflict(
            "Provide only a dataset or a metadata file, not both.",
        )),
        (Some(name), None) => dataset_maps(&name),
        (None, Some(path)) => {
            let metadata = MetadataFile::from_file(path)?;
            Ok((metadata.labels, metadata.palette))
        }
        (None, None) => match &config.default.dataset {
            Some(name) => dataset_maps(name),
            None => Err(Error::config_conflict(
                "Provide either a dataset or class labels and a class palette.",
            )),
        },
    }
}

fn dataset_maps(
    name: &str,
) -> Result<(HashMap<ClassCode, String>, HashMap<ClassCode, String>)> {
    let dataset = Dataset::find(name).ok_or_else(|| {
        let keys: Vec<&str> = Dataset::all().iter().map(|d| d.key).collect();
        Error::Config(format!("Dataset `{}` not found. Choose from {:?}.", name, keys))
    })?;
    Ok((dataset.labels_map(), dataset.palette_map()))
}

/// Sankify command implementation
pub mod sankify {
    use super::*;
    use crate::cli::{Cli, Commands, OutputFormat};
    use crate::data_source::{DataSource, SampleQuery, create_data_source};
    use crate::sankey::{ConsolidateOptions, SankeyParameters, Theme, build_flow_graph, to_figure};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    /// Execute the sankify command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        let Commands::Sankify {
            source,
            input,
            dataset,
            metadata,
            exclude,
            max_classes,
            keep_na,
            samples,
            seed,
            steps,
            title,
            theme,
            label_type,
            output,
            out,
        } = args.command
        else {
            unreachable!("sankify::execute called with wrong command")
        };

        let (labels, palette) = resolve_metadata(dataset, metadata, &config)?;

        let exclude: BTreeSet<ClassCode> = if exclude.is_empty() {
            config.flow.exclude.iter().copied().collect()
        } else {
            exclude.into_iter().collect()
        };
        let options = ConsolidateOptions {
            exclude,
            max_classes: max_classes.or(config.flow.max_classes),
            dropna: if keep_na { false } else { config.flow.dropna },
        };

        let theme = Theme::load(theme.as_deref().unwrap_or(&config.default.theme))?;

        let data_source = create_data_source(source, input)?;
        let mut query = SampleQuery::default()
            .n(samples.unwrap_or(config.flow.samples))
            .seed(seed.unwrap_or(config.flow.seed));
        if let Some(steps) = steps {
            query = query.step_labels(steps);
        }

        tracing::info!("Fetching samples...");
        let table = data_source.fetch_samples(&query).await?;
        tracing::info!(
            "Fetched {} samples across {} steps",
            table.len(),
            table.step_count()
        );

        let graph = build_flow_graph(&table, &labels, &palette, &options)?;
        let stats = graph.stats();
        tracing::info!(
            "Assembled flow graph: {} nodes, {} edges",
            stats.total_nodes,
            stats.total_edges
        );

        match output {
            OutputFormat::Json => {
                let params = SankeyParameters::from_graph(&graph, label_type);
                let figure = to_figure(&params, &theme, title.as_deref());
                match out {
                    Some(path) => {
                        let mut file = std::fs::File::create(&path)?;
                        crate::cli::output::output_json(&mut file, &figure)?;
                        println!("Figure exported to {}", path.display());
                    }
                    None => {
                        crate::cli::output::output_json(&mut std::io::stdout(), &figure)?;
                    }
                }
            }
            OutputFormat::Table => {
                crate::cli::output::output_table(&mut std::io::stdout(), &graph)?;
            }
            OutputFormat::Html => {
                let params = SankeyParameters::from_graph(&graph, label_type);
                let figure = to_figure(&params, &theme, title.as_deref());
                let path = out.unwrap_or_else(|| {
                    PathBuf::from(format!(
                        "{}.sankey.html",
                        chrono::Utc::now().format("%Y%m%d%H%M%S")
                    ))
                });
                let mut file = std::fs::File::create(&path)?;
                crate::cli::output::output_html(&mut file, &figure, title.as_deref())?;
                println!("Diagram exported to {}", path.display());
            }
        }

        Ok(())
    }
}

/// Datasets command implementation
pub mod datasets {
    use super::*;

    /// Execute the datasets command
    pub fn execute() -> Result<()> {
        println!("📋 Premade Datasets");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        for dataset in Dataset::all() {
            let first = dataset.years.first().copied().unwrap_or_default();
            let last = dataset.years.last().copied().unwrap_or_default();
            println!();
            println!("  {} - {}", dataset.key, dataset.name);
            println!("    Band:    {}", dataset.band);
            println!("    Classes: {}", dataset.labels.len());
            println!("    Years:   {}-{}", first, last);
            if let Some(nodata) = dataset.nodata {
                println!("    Nodata:  {}", nodata);
            }
        }

        Ok(())
    }
}

/// Validate command implementation
pub mod validate {
    use super::*;
    use crate::catalog::CategoryRegistry;
    use crate::data_source::{DataSource, SampleQuery, file::FileDataSource};
    use std::path::PathBuf;

    /// Execute the validate command
    pub async fn execute(metadata_path: PathBuf, input: PathBuf) -> Result<()> {
        tracing::info!("Validating metadata: {:?}", metadata_path);

        let metadata = match MetadataFile::from_file(&metadata_path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ Failed to load metadata: {}", e);
                return Err(e);
            }
        };

        let table = FileDataSource::new(&input)
            .fetch_samples(&SampleQuery::default())
            .await?;
        let observed = table.observed_codes();

        println!("📋 Metadata Validation Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("Metadata: {:?}", metadata_path);
        println!("Samples:  {:?}", input);
        println!();
        println!("Rows:             {}", table.len());
        println!("Steps:            {}", table.step_count());
        println!("Observed classes: {}", observed.len());
        println!("Defined classes:  {}", metadata.labels.len());
        println!();

        match CategoryRegistry::build(&observed, &metadata.labels, &metadata.palette) {
            Ok(registry) => {
                for category in registry.categories() {
                    println!("    {:>6}  {:<32} {}", category.code, category.label, category.color);
                }
                println!();
                println!("✅ Metadata covers all {} observed classes", registry.len());
                Ok(())
            }
            Err(e) => {
                println!("❌ {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_metadata_conflicts() {
        let config = Config::default();

        let err = resolve_metadata(
            Some("nlcd".to_string()),
            Some("meta.json".into()),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConfigConflict(_)));

        let err = resolve_metadata(None, None, &config).unwrap_err();
        assert!(matches!(err, Error::ConfigConflict(_)));
    }

    #[test]
    fn test_resolve_metadata_from_dataset() {
        let config = Config::default();
        let (labels, palette) =
            resolve_metadata(Some("lcms-lu".to_string()), None, &config).unwrap();

        assert_eq!(labels[&3], "Forest");
        assert_eq!(palette[&3], "#1b9d0c");
        // nodata is stripped
        assert!(!labels.contains_key(&6));
    }

    #[test]
    fn test_resolve_metadata_config_fallback() {
        let mut config = Config::default();
        config.default.dataset = Some("nlcd".to_string());

        let (labels, _) = resolve_metadata(None, None, &config).unwrap();
        assert_eq!(labels[&11], "Open water");
    }

    #[test]
    fn test_unknown_dataset() {
        let err = dataset_maps("no-such-dataset").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genescan_core::models::AnnotationSet;
use genescan_overlaprs::{ChromosomeIndexSet, IntoChromosomeIndexSet};
use genescan_scoring::ScanConfig;

/// The config named by `--config`, or the defaults.
pub fn load_config(matches: &ArgMatches) -> Result<ScanConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => {
            let config = ScanConfig::try_from(Path::new(path))
                .with_context(|| format!("Failed to load config: {}", path))?;
            info!("Using config {}", path);
            Ok(config)
        }
        None => Ok(ScanConfig::default()),
    }
}

/// Load the `--annotation` file and index it, padded by `--margin` if given.
pub fn build_index(matches: &ArgMatches, config: &ScanConfig) -> Result<ChromosomeIndexSet> {
    let annotation = matches
        .get_one::<String>("annotation")
        .context("A path to a gene annotation file is required.")?;

    let margin = matches
        .get_one::<u32>("margin")
        .copied()
        .unwrap_or(config.padding_margin);

    let genes = AnnotationSet::from_path(Path::new(annotation), &config.annotation_options())
        .with_context(|| format!("Failed to load gene annotation: {}", annotation))?;

    let index = genes
        .into_chromosome_index_set(margin)
        .context("Failed to index gene annotation")?;

    Ok(index)
}

use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genescan_scoring::{AssocFileGlob, score_and_write, score_batch, sibling_path};

use crate::common::{build_index, load_config};

pub fn run_score(matches: &ArgMatches) -> Result<()> {
    let pattern = matches
        .get_one::<String>("results")
        .context("A path or glob of association files is required.")?;
    let output = matches.get_one::<String>("output");

    if let Some(threads) = matches.get_one::<usize>("threads") {
        rayon::ThreadPoolBuilder::new()
            .num_threads(*threads)
            .build_global()
            .context("Failed to set up the worker thread pool")?;
    }

    let config = load_config(matches)?;

    let files = AssocFileGlob::new(pattern)?;
    if files.is_empty() {
        anyhow::bail!("No association files match: {}", pattern);
    }
    if output.is_some() && files.len() > 1 {
        anyhow::bail!(
            "--output needs a single association file, but {} match {}",
            files.len(),
            pattern
        );
    }

    let index = build_index(matches, &config)?;

    match output {
        Some(output) => {
            let assoc_path = &files.files()[0];
            let score_path = Path::new(output);
            let summary_path = sibling_path(score_path, &config.summary_file_name);

            let summary = score_and_write(&index, assoc_path, score_path, &summary_path, &config)
                .with_context(|| format!("Failed to score {}", assoc_path.display()))?;

            info!(
                "Wrote {} gene scores to {} (NA count: {})",
                summary.genes_scored, output, summary.na_count
            );
        }
        None => {
            score_batch(&index, files.files(), &config)?;
        }
    }

    Ok(())
}

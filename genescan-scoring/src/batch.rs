use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use genescan_overlaprs::ChromosomeIndexSet;

use crate::assoc_scoring::{RunSummary, score_and_write};
use crate::config::ScanConfig;
use crate::errors::{Result, ScoringError};
use crate::files::sibling_path;

/// The summary of one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub path: PathBuf,
    pub summary: RunSummary,
}

///
/// Score every association file as its own analysis run, in parallel, over one
/// shared index. Score and summary files are written next to each association file,
/// named after `config.score_file_name` and `config.summary_file_name`.
///
/// The first failing run aborts the batch with its error. Files that would write the
/// same output (two association files in one directory) are rejected before any
/// scoring starts.
///
/// # Arguments
/// - index: the shared gene index
/// - files: the association files
/// - config: the scan settings
pub fn score_batch(
    index: &ChromosomeIndexSet,
    files: &[PathBuf],
    config: &ScanConfig,
) -> Result<Vec<BatchOutcome>> {
    check_output_paths(files, config)?;

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Scoring association files");

    let outcomes = files
        .par_iter()
        .map(|path| -> Result<BatchOutcome> {
            let summary = score_one(index, path, config)?;
            bar.inc(1);
            Ok(BatchOutcome {
                path: path.clone(),
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    bar.finish_with_message("Done");

    let na_total: u64 = outcomes.iter().map(|o| o.summary.na_count).sum();
    info!(
        "Scored {} association files (total NA count: {})",
        outcomes.len(),
        na_total
    );

    Ok(outcomes)
}

fn check_output_paths(files: &[PathBuf], config: &ScanConfig) -> Result<()> {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(files.len() * 2);

    for path in files {
        for name in [&config.score_file_name, &config.summary_file_name] {
            let output = sibling_path(path, name);
            if let Some(first) = owners.insert(output.clone(), path) {
                return Err(ScoringError::OutputCollision {
                    first: first.clone(),
                    second: path.clone(),
                    output,
                });
            }
        }
    }

    Ok(())
}

fn score_one(index: &ChromosomeIndexSet, path: &Path, config: &ScanConfig) -> Result<RunSummary> {
    let score_path = sibling_path(path, &config.score_file_name);
    let summary_path = sibling_path(path, &config.summary_file_name);
    score_and_write(index, path, &score_path, &summary_path, config)
}

use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use genescan_core::utils::get_dynamic_reader;
use genescan_overlaprs::ChromosomeIndexSet;

use crate::aggregator::{GeneScore, StatisticAggregator};
use crate::assoc::{PValue, RowOutcome, SkipReason, parse_assoc_row};
use crate::config::ScanConfig;
use crate::errors::{Result, ScoringError};
use crate::files::write_scores;

/// Row and match counts of one analysis run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank rows read, header included.
    pub rows_read: u64,
    /// Rows that passed the effect tag and chromosome filters.
    pub rows_used: u64,
    pub unmapped_rows: u64,
    /// (row, gene) matches, sentinel ones included.
    pub matches: u64,
    /// Matches whose p-value was the sentinel.
    pub na_count: u64,
    pub genes_scored: usize,
}

impl RunSummary {
    pub fn as_string(&self) -> String {
        format!(
            "NA Count: {}\nRows read: {}\nRows used: {}\nUnmapped chromosome rows: {}\nGene matches: {}\nGenes scored: {}\n",
            self.na_count,
            self.rows_read,
            self.rows_used,
            self.unmapped_rows,
            self.matches,
            self.genes_scored
        )
    }

    ///
    /// Write the summary as a small text file.
    ///
    /// # Arguments
    /// - path: the file to write, parent directories are created
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.as_string().as_bytes())?;
        writer.flush()
    }
}

/// The outcome of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub scores: Vec<GeneScore>,
    pub summary: RunSummary,
}

///
/// Score association rows from any buffered reader against a gene index.
///
/// The p-value of a row is only parsed once its position hits at least one gene, so
/// rows between genes never fail on their p-value column.
///
/// # Arguments
/// - reader: association rows
/// - index: the shared gene index
/// - config: effect tag, sentinel and chromosome code table
pub fn score_assoc_reader<R: BufRead>(
    reader: R,
    index: &ChromosomeIndexSet,
    config: &ScanConfig,
) -> Result<RunResult> {
    let mut aggregator = StatisticAggregator::new();
    let mut summary = RunSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;

        let hit = match parse_assoc_row(&line, idx + 1, config)? {
            RowOutcome::Skipped(SkipReason::Blank) => continue,
            RowOutcome::Skipped(SkipReason::OtherEffect) => {
                summary.rows_read += 1;
                continue;
            }
            RowOutcome::Skipped(SkipReason::UnmappedChromosome) => {
                summary.rows_read += 1;
                summary.unmapped_rows += 1;
                debug!("Skipping row {} with unmapped chromosome code", idx + 1);
                continue;
            }
            RowOutcome::Hit(hit) => hit,
        };

        summary.rows_read += 1;
        summary.rows_used += 1;

        let mut genes = index.find_genes(hit.chromosome, hit.position).peekable();
        if genes.peek().is_none() {
            continue;
        }

        let p_value = PValue::parse(hit.p_field, &config.na_sentinel).map_err(|_| {
            ScoringError::MalformedRow {
                line: idx + 1,
                row: line.trim().to_string(),
                reason: format!("invalid p-value '{}'", hit.p_field),
            }
        })?;

        for gene in genes {
            aggregator.record_match(gene, p_value)?;
        }
    }

    summary.matches = aggregator.match_count();
    summary.na_count = aggregator.skipped_count();
    summary.genes_scored = aggregator.len();

    Ok(RunResult {
        scores: aggregator.finalize(),
        summary,
    })
}

///
/// Score one association file (plain or gzipped).
///
/// # Arguments
/// - index: the shared gene index
/// - path: the association file
/// - config: the scan settings
pub fn score_assoc_file(
    index: &ChromosomeIndexSet,
    path: &Path,
    config: &ScanConfig,
) -> Result<RunResult> {
    let start = Instant::now();

    let reader = get_dynamic_reader(path).map_err(|e| ScoringError::FileReadError {
        path: path.to_path_buf(),
        reason: format!("{:#}", e),
    })?;

    let result = score_assoc_reader(reader, index, config)?;

    info!(
        "{}: {} rows used, {} genes scored, NA count {} ({:.2?})",
        path.display(),
        result.summary.rows_used,
        result.summary.genes_scored,
        result.summary.na_count,
        start.elapsed()
    );

    Ok(result)
}

///
/// Score one association file and write its score and summary files.
///
/// # Arguments
/// - index: the shared gene index
/// - path: the association file
/// - score_path: where the per-gene scores go
/// - summary_path: where the run summary goes
/// - config: the scan settings
pub fn score_and_write(
    index: &ChromosomeIndexSet,
    path: &Path,
    score_path: &Path,
    summary_path: &Path,
    config: &ScanConfig,
) -> Result<RunSummary> {
    let result = score_assoc_file(index, path, config)?;

    write_scores(score_path, &result.scores)?;
    result.summary.write_to_file(summary_path)?;

    Ok(result.summary)
}

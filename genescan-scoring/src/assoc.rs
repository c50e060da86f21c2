//! Parsing of per-position association rows (plink `.assoc.linear` output).
//!
//! A row looks like
//!
//! ```text
//!  CHR         SNP         BP   A1       TEST    NMISS       BETA         STAT            P
//!    1   2L_5372_SNP       5372    T        ADD      198     0.1023       0.8807       0.3796
//! ```
//!
//! Only rows whose `TEST` column carries the configured effect tag are used, and the
//! numeric `CHR` code is mapped to a chromosome key through the config table.

use crate::config::ScanConfig;
use crate::consts::{CHR_COL, P_COL, POS_COL, TEST_COL};
use crate::errors::{Result, ScoringError};

/// A p-value field: either a number or the "not available" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PValue {
    Value(f64),
    NotAvailable,
}

impl PValue {
    ///
    /// Parse a p-value field.
    ///
    /// # Arguments
    /// - field: the raw column text
    /// - sentinel: the marker for a missing value, e.g. `NA`
    pub fn parse(field: &str, sentinel: &str) -> Result<Self> {
        if field == sentinel {
            return Ok(PValue::NotAvailable);
        }

        field
            .parse::<f64>()
            .map(PValue::Value)
            .map_err(|_| ScoringError::InvalidPValue(field.to_string()))
    }
}

/// Why a row did not contribute to the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Empty line.
    Blank,
    /// The effect tag is not the configured one (this includes the header row).
    OtherEffect,
    /// The chromosome code has no entry in the code table.
    UnmappedChromosome,
}

/// A row that passed the effect and chromosome filters.
#[derive(Debug, Clone, PartialEq)]
pub struct AssocHit<'a> {
    pub chromosome: &'a str,
    pub position: u32,
    /// Raw p-value text; parsed only when the position hits a gene.
    pub p_field: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome<'a> {
    Skipped(SkipReason),
    Hit(AssocHit<'a>),
}

fn malformed(line_no: usize, line: &str, reason: String) -> ScoringError {
    ScoringError::MalformedRow {
        line: line_no,
        row: line.trim().to_string(),
        reason,
    }
}

///
/// Classify one whitespace-delimited association row.
///
/// # Arguments
/// - line: the raw row
/// - line_no: 1-based line number, used in error messages
/// - config: supplies the effect tag and the chromosome code table
pub fn parse_assoc_row<'a>(
    line: &'a str,
    line_no: usize,
    config: &'a ScanConfig,
) -> Result<RowOutcome<'a>> {
    let cols: Vec<&str> = line.split_whitespace().collect();

    if cols.is_empty() {
        return Ok(RowOutcome::Skipped(SkipReason::Blank));
    }

    if cols.len() <= TEST_COL {
        return Err(malformed(
            line_no,
            line,
            format!(
                "missing effect tag column: expected at least {} columns, found {}",
                TEST_COL + 1,
                cols.len()
            ),
        ));
    }

    if cols[TEST_COL] != config.effect_tag {
        return Ok(RowOutcome::Skipped(SkipReason::OtherEffect));
    }

    let Some(chromosome) = config.chromosome_for_code(cols[CHR_COL]) else {
        return Ok(RowOutcome::Skipped(SkipReason::UnmappedChromosome));
    };

    if cols.len() <= P_COL {
        return Err(malformed(
            line_no,
            line,
            format!(
                "missing p-value column: expected at least {} columns, found {}",
                P_COL + 1,
                cols.len()
            ),
        ));
    }

    let position = cols[POS_COL].parse::<u32>().map_err(|_| {
        malformed(
            line_no,
            line,
            format!("invalid position '{}'", cols[POS_COL]),
        )
    })?;

    Ok(RowOutcome::Hit(AssocHit {
        chromosome,
        position,
        p_field: cols[P_COL],
    }))
}

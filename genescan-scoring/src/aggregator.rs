use std::fmt::{self, Display};

use fxhash::FxHashMap;

use genescan_core::models::GeneRecord;

use crate::assoc::PValue;
use crate::consts::FISHER_FACTOR;
use crate::errors::{Result, ScoringError};

/// The combined statistic of one gene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneScore {
    pub gene_id: u64,
    pub score: f64,
}

impl Display for GeneScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{:.6}", self.gene_id, self.score)
    }
}

///
/// Accumulates `log10(p)` per gene over one analysis run, and turns the sums into
/// `-2 * sum` when the run is done.
///
/// A gene is only present in the output if it received at least one numeric p-value.
/// Sentinel values are counted once per matched (row, gene) pair.
///
#[derive(Debug, Default, Clone)]
pub struct StatisticAggregator {
    log_sums: FxHashMap<u64, f64>,
    skipped: u64,
    matches: u64,
}

impl StatisticAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Record one (gene, p-value) match.
    ///
    /// # Arguments
    /// - gene: the gene whose padded span contained the position
    /// - value: the p-value of the row
    pub fn record_match(&mut self, gene: &GeneRecord, value: PValue) -> Result<()> {
        self.record(gene.id, value)
    }

    /// Same as [`StatisticAggregator::record_match`], keyed by gene id only.
    pub fn record(&mut self, gene_id: u64, value: PValue) -> Result<()> {
        self.matches += 1;

        match value {
            PValue::NotAvailable => {
                self.skipped += 1;
                Ok(())
            }
            PValue::Value(p) if !p.is_finite() || p <= 0.0 => {
                Err(ScoringError::NonPositivePValue { gene_id, value: p })
            }
            PValue::Value(p) => {
                *self.log_sums.entry(gene_id).or_insert(0.0) += p.log10();
                Ok(())
            }
        }
    }

    /// The number of matches whose p-value was the sentinel.
    pub fn skipped_count(&self) -> u64 {
        self.skipped
    }

    /// The number of matches recorded, sentinel ones included.
    pub fn match_count(&self) -> u64 {
        self.matches
    }

    /// The running `log10` sum of a gene, if it has one.
    pub fn log_sum(&self, gene_id: u64) -> Option<f64> {
        self.log_sums.get(&gene_id).copied()
    }

    /// The number of genes with at least one numeric p-value.
    pub fn len(&self) -> usize {
        self.log_sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_sums.is_empty()
    }

    /// Consume the aggregator and produce one score per gene, sorted by gene id.
    pub fn finalize(self) -> Vec<GeneScore> {
        let mut scores: Vec<GeneScore> = self
            .log_sums
            .into_iter()
            .map(|(gene_id, sum)| GeneScore {
                gene_id,
                // adding 0.0 folds -0.0 into 0.0
                score: FISHER_FACTOR * sum + 0.0,
            })
            .collect();

        scores.sort_by_key(|s| s.gene_id);
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn gene(id: u64) -> GeneRecord {
        GeneRecord {
            id,
            name: format!("FBgn{:07}", id),
            min: 100,
            max: 200,
            chromosome: "2L".to_string(),
        }
    }

    #[rstest]
    fn test_single_gene_two_values() {
        let mut agg = StatisticAggregator::new();
        agg.record_match(&gene(1), PValue::Value(0.01)).unwrap();
        agg.record_match(&gene(1), PValue::Value(0.1)).unwrap();

        let scores = agg.finalize();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].gene_id, 1);
        assert!((scores[0].score - 6.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_p_value_of_one_scores_zero() {
        let mut agg = StatisticAggregator::new();
        agg.record(7, PValue::Value(1.0)).unwrap();

        let scores = agg.finalize();
        assert_eq!(scores, vec![GeneScore { gene_id: 7, score: 0.0 }]);
    }

    #[rstest]
    fn test_values_that_cancel_out() {
        let mut agg = StatisticAggregator::new();
        agg.record_match(&gene(1), PValue::Value(10.0)).unwrap();
        agg.record_match(&gene(1), PValue::Value(0.1)).unwrap();

        let scores = agg.finalize();
        assert!(scores[0].score.abs() < 1e-12);
    }

    #[rstest]
    fn test_sentinel_is_counted_not_scored() {
        let mut agg = StatisticAggregator::new();
        agg.record(1, PValue::NotAvailable).unwrap();
        agg.record(1, PValue::NotAvailable).unwrap();
        agg.record(2, PValue::Value(0.5)).unwrap();

        assert_eq!(agg.skipped_count(), 2);
        assert_eq!(agg.match_count(), 3);
        assert_eq!(agg.log_sum(1), None);

        let ids: Vec<u64> = agg.finalize().iter().map(|s| s.gene_id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.3)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_non_positive_p_value_is_rejected(#[case] p: f64) {
        let mut agg = StatisticAggregator::new();
        let result = agg.record(31208, PValue::Value(p));

        assert!(matches!(
            result,
            Err(ScoringError::NonPositivePValue { gene_id: 31208, .. })
        ));
        assert!(agg.is_empty());
    }

    #[rstest]
    fn test_output_sorted_by_id() {
        let mut agg = StatisticAggregator::new();
        for id in [40, 3, 17, 3, 99, 1] {
            agg.record(id, PValue::Value(0.5)).unwrap();
        }

        let ids: Vec<u64> = agg.finalize().iter().map(|s| s.gene_id).collect();
        assert_eq!(ids, vec![1, 3, 17, 40, 99]);
    }

    #[rstest]
    fn test_empty_run() {
        let agg = StatisticAggregator::new();
        assert_eq!(agg.skipped_count(), 0);
        assert!(agg.finalize().is_empty());
    }

    #[rstest]
    #[case(GeneScore { gene_id: 31208, score: 6.0 }, "31208\t6.000000")]
    #[case(GeneScore { gene_id: 1, score: 0.0 }, "1\t0.000000")]
    #[case(GeneScore { gene_id: 12, score: 1.2345678 }, "12\t1.234568")]
    fn test_display(#[case] score: GeneScore, #[case] expected: &str) {
        assert_eq!(score.to_string(), expected);
    }
}

//! Genome-wide gene lookup across multiple chromosomes.
//!
//! This module provides [`ChromosomeIndexSet`], which keeps one
//! [`IntervalIndex`] per chromosome and answers "which genes contain this
//! position" for any chromosome key.
//!
//! # Examples
//!
//! ```
//! use genescan_core::models::{AnnotationSet, GeneRecord};
//! use genescan_overlaprs::chrom_index::IntoChromosomeIndexSet;
//!
//! let genes = AnnotationSet::from(vec![
//!     GeneRecord::new("FBgn0031208", 7529, 9484, "2L", 4).unwrap(),
//!     GeneRecord::new("FBgn0263584", 21952, 24237, "2L", 4).unwrap(),
//!     GeneRecord::new("FBgn0067779", 10000, 12000, "X", 4).unwrap(),
//! ]);
//!
//! let index = genes.into_chromosome_index_set(5000).unwrap();
//!
//! // padded by 5000, FBgn0031208 spans 2529..=14484
//! let hits: Vec<u64> = index.find_genes("2L", 9000).map(|g| g.id).collect();
//! assert_eq!(hits, vec![31208]);
//!
//! // unknown chromosomes are simply empty
//! assert_eq!(index.find_genes("3R", 15000).count(), 0);
//! ```

use std::collections::HashMap;

use log::{debug, info};

use genescan_core::models::{AnnotationSet, GeneRecord};

use crate::bucket_index::{IndexError, IntervalIndex, IterFind};

/// The per-chromosome index type used for gene annotations.
pub type GeneIndex = IntervalIndex<u32, GeneRecord>;

/// A genome-wide gene index: one [`IntervalIndex`] per chromosome key.
///
/// The set is immutable once built, so a single instance can be shared across
/// threads and analysis runs.
#[derive(Debug, Clone, Default)]
pub struct ChromosomeIndexSet {
    index_maps: HashMap<String, GeneIndex>,
}

impl ChromosomeIndexSet {
    ///
    /// Group records by chromosome and build one index per group.
    ///
    /// # Arguments
    /// - records: every gene record of the annotation
    /// - margin: padding applied to both ends of every record
    pub fn build<R>(records: R, margin: u32) -> Result<Self, IndexError>
    where
        R: IntoIterator<Item = GeneRecord>,
    {
        // STEP 1: organize records into vectors, one for each chrom
        let mut by_chr: HashMap<String, Vec<GeneRecord>> = HashMap::new();
        for record in records {
            by_chr
                .entry(record.chromosome.clone())
                .or_default()
                .push(record);
        }

        // STEP 2: build the index for each chrom
        let mut index_maps: HashMap<String, GeneIndex> = HashMap::with_capacity(by_chr.len());
        for (chr, chr_records) in by_chr {
            let index = IntervalIndex::build(chr_records, margin)?;
            debug!(
                "{}: {} genes in {} buckets (largest bucket: {})",
                chr,
                index.len(),
                index.num_nodes(),
                index.max_bucket_len()
            );
            index_maps.insert(chr, index);
        }

        let set = ChromosomeIndexSet { index_maps };
        info!(
            "Indexed {} genes on {} chromosomes into {} buckets (margin: {})",
            set.num_records(),
            set.len(),
            set.num_nodes(),
            margin
        );

        Ok(set)
    }

    ///
    /// Iterate over the genes on `chromosome` whose padded span contains `position`.
    ///
    /// The iterator is lazy and borrows the index; call again to restart the query.
    /// An unknown chromosome gives an empty iterator.
    pub fn find_genes(&self, chromosome: &str, position: u32) -> IterFind<'_, u32, GeneRecord> {
        match self.index_maps.get(chromosome) {
            Some(index) => index.find_iter(position),
            None => IterFind::empty(position),
        }
    }

    /// The index for one chromosome, if any genes were annotated on it.
    pub fn get(&self, chromosome: &str) -> Option<&GeneIndex> {
        self.index_maps.get(chromosome)
    }

    /// Chromosome keys, in no particular order.
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.index_maps.keys().map(String::as_str)
    }

    /// The number of indexed chromosomes.
    pub fn len(&self) -> usize {
        self.index_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_maps.is_empty()
    }

    /// The total number of indexed gene records.
    pub fn num_records(&self) -> usize {
        self.index_maps.values().map(IntervalIndex::len).sum()
    }

    /// The total number of buckets over every chromosome.
    pub fn num_nodes(&self) -> usize {
        self.index_maps.values().map(IntervalIndex::num_nodes).sum()
    }
}

/// A trait for converting gene annotations into a [`ChromosomeIndexSet`].
pub trait IntoChromosomeIndexSet {
    /// Consumes the input and builds a [`ChromosomeIndexSet`], padding every record by
    /// `margin`.
    fn into_chromosome_index_set(self, margin: u32) -> Result<ChromosomeIndexSet, IndexError>;
}

impl IntoChromosomeIndexSet for AnnotationSet {
    fn into_chromosome_index_set(self, margin: u32) -> Result<ChromosomeIndexSet, IndexError> {
        ChromosomeIndexSet::build(self.records, margin)
    }
}

impl IntoChromosomeIndexSet for Vec<GeneRecord> {
    fn into_chromosome_index_set(self, margin: u32) -> Result<ChromosomeIndexSet, IndexError> {
        ChromosomeIndexSet::build(self, margin)
    }
}

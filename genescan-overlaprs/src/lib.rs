//! Padded gene-interval indexing for point queries.
//!
//! This crate maps a position on a chromosome to the gene records whose padded span
//! contains it. It is part of the genescan workspace and replaces a naive "test every
//! gene on every query" scan with a bucketed index:
//!
//! - records are padded once and sorted by start,
//! - overlapping records are clustered into sorted, non-overlapping buckets,
//! - a query binary searches the buckets and checks only the members of one bucket.
//!
//! All overlap logic lives here; the scoring crate only consumes the query API.
//!
//! ## Quick Start
//!
//! ```rust
//! use genescan_core::models::GeneRecord;
//! use genescan_overlaprs::{ChromosomeIndexSet, IntoChromosomeIndexSet};
//!
//! let genes = vec![
//!     GeneRecord::new("FBgn0000100", 100, 200, "2L", 4).unwrap(),
//!     GeneRecord::new("FBgn0000101", 190, 300, "2L", 4).unwrap(),
//! ];
//!
//! let index: ChromosomeIndexSet = genes.into_chromosome_index_set(5).unwrap();
//!
//! for gene in index.find_genes("2L", 195) {
//!     println!("{} contains 2L:195", gene.name);
//! }
//! ```
//!
//! ## Performance
//!
//! Gene annotations are mostly sparse with occasional dense clusters (gene families).
//! The cost of a query is a binary search over the buckets of one chromosome plus a
//! linear scan bounded by the largest bucket, not by the number of genes.

/// The bucketed single-chromosome index.
///
/// See [`IntervalIndex`] for details.
pub mod bucket_index;

/// Genome-wide lookup over one index per chromosome.
///
/// See [`ChromosomeIndexSet`] for details.
pub mod chrom_index;

/// Core traits for indexable spans.
pub mod traits;

// re-exports
pub use self::bucket_index::{Bucket, IndexError, IntervalIndex, IterFind};
pub use self::chrom_index::{ChromosomeIndexSet, GeneIndex, IntoChromosomeIndexSet};
pub use self::traits::Span;

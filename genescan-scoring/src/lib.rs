//! Gene-level scoring of association results.
//!
//! Each position-level p-value of a plink `.assoc.linear` file is assigned to every gene
//! whose padded span contains the position, and the p-values of each gene are combined
//! into `-2 * sum(log10(p))`.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use genescan_core::models::AnnotationSet;
//! use genescan_overlaprs::IntoChromosomeIndexSet;
//! use genescan_scoring::{ScanConfig, score_assoc_file, write_scores};
//!
//! let config = ScanConfig::default();
//! let genes = AnnotationSet::from_path(Path::new("genes.csv"), &config.annotation_options()).unwrap();
//! let index = genes.into_chromosome_index_set(config.padding_margin).unwrap();
//!
//! let result = score_assoc_file(&index, Path::new("plink.assoc.linear"), &config).unwrap();
//! write_scores("tstat.txt", &result.scores).unwrap();
//! ```
pub mod aggregator;
pub mod assoc;
pub mod assoc_scoring;
pub mod batch;
pub mod config;
pub mod consts;
pub mod errors;
pub mod files;

// re-exports
pub use aggregator::*;
pub use assoc::*;
pub use assoc_scoring::*;
pub use batch::*;
pub use config::*;
pub use errors::{ConfigError, ScoringError};
pub use files::*;

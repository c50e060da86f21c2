//! Core models and readers shared by the genescan crates.
//!
//! This crate holds the [`GeneRecord`](models::GeneRecord) model, the annotation loader
//! ([`AnnotationSet`](models::AnnotationSet)) and small reader utilities that transparently
//! handle gzip'd input.
//!
//! ```no_run
//! use genescan_core::models::{AnnotationOptions, AnnotationSet};
//! use std::path::Path;
//!
//! let genes = AnnotationSet::from_path(Path::new("mart_export.txt"), &AnnotationOptions::default())
//!     .unwrap();
//! println!("loaded {} genes", genes.len());
//! ```
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

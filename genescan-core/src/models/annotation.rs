use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::consts::DEFAULT_ID_PREFIX_LEN;
use crate::errors::{AnnotationError, Result};
use crate::models::GeneRecord;
use crate::utils::get_dynamic_reader;

///
/// Options that control how an annotation file is turned into gene records.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationOptions {
    /// Number of leading characters stripped from a gene name before parsing its id.
    pub id_prefix_len: usize,
    /// Tolerate (and skip) a malformed first row, i.e. a column header.
    pub allow_header: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        AnnotationOptions {
            id_prefix_len: DEFAULT_ID_PREFIX_LEN,
            allow_header: true,
        }
    }
}

///
/// AnnotationSet struct, the flat list of gene records read from an annotation
/// export (`name, min, max, chromosome` per row).
///
#[derive(Clone, Debug)]
pub struct AnnotationSet {
    pub records: Vec<GeneRecord>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

/// Split a row on commas when it has any, otherwise on whitespace.
fn split_annotation_row(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

impl AnnotationSet {
    ///
    /// Read gene records from any buffered reader.
    ///
    /// The first non-blank row may fail to parse when `allow_header` is set; it is
    /// kept as the header and skipped. Any later malformed row aborts the load.
    ///
    pub fn from_reader<R: BufRead>(reader: R, options: &AnnotationOptions) -> Result<Self> {
        let mut records: Vec<GeneRecord> = Vec::new();
        let mut header: Option<String> = None;
        let mut first_row = true;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let fields = split_annotation_row(&line);

            match GeneRecord::from_fields(&fields, options.id_prefix_len) {
                Ok(record) => records.push(record),
                Err(e) if first_row && options.allow_header => {
                    debug!("Treating first annotation row as header ({}): {}", e, line);
                    header = Some(line.clone());
                }
                Err(e) => {
                    return Err(AnnotationError::MalformedRow {
                        line: idx + 1,
                        row: line.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            first_row = false;
        }

        Ok(AnnotationSet {
            records,
            header,
            path: None,
        })
    }

    ///
    /// Read an annotation file (optionally gzip'd) from disk.
    ///
    /// # Arguments
    /// - path: path to the annotation file
    /// - options: parsing options
    ///
    pub fn from_path(path: &Path, options: &AnnotationOptions) -> Result<Self> {
        let reader = get_dynamic_reader(path)
            .map_err(|e| AnnotationError::FileReadError(format!("{:#}", e)))?;

        let mut set = AnnotationSet::from_reader(reader, options)?;

        if set.is_empty() {
            return Err(AnnotationError::EmptyAnnotation(path.display().to_string()));
        }

        info!(
            "Loaded {} gene records from {}",
            set.len(),
            path.display()
        );

        set.path = Some(path.to_owned());
        Ok(set)
    }

    /// Number of gene records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneRecord> {
        self.records.iter()
    }
}

impl TryFrom<&Path> for AnnotationSet {
    type Error = AnnotationError;

    fn try_from(value: &Path) -> Result<Self> {
        AnnotationSet::from_path(value, &AnnotationOptions::default())
    }
}

impl TryFrom<&str> for AnnotationSet {
    type Error = AnnotationError;

    fn try_from(value: &str) -> Result<Self> {
        AnnotationSet::try_from(Path::new(value))
    }
}

impl From<Vec<GeneRecord>> for AnnotationSet {
    fn from(records: Vec<GeneRecord>) -> Self {
        AnnotationSet {
            records,
            header: None,
            path: None,
        }
    }
}

impl IntoIterator for AnnotationSet {
    type Item = GeneRecord;
    type IntoIter = std::vec::IntoIter<GeneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a GeneRecord;
    type IntoIter = std::slice::Iter<'a, GeneRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

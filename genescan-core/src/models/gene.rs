use std::fmt::{self, Display};

use crate::consts::DEFAULT_ID_PREFIX_LEN;
use crate::errors::{AnnotationError, Result};

///
/// GeneRecord struct, one annotated gene interval on one chromosome.
///
/// Bounds are inclusive on both ends. They are widened exactly once, when the
/// record is handed to an interval index, via [`GeneRecord::pad`].
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneRecord {
    pub id: u64,
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub chromosome: String,
}

impl GeneRecord {
    ///
    /// Create a new gene record from already parsed parts.
    ///
    /// The numeric id is extracted from `name` by dropping the first
    /// `id_prefix_len` characters (e.g. `FBgn0001234` -> `1234`).
    ///
    pub fn new(
        name: &str,
        min: u32,
        max: u32,
        chromosome: &str,
        id_prefix_len: usize,
    ) -> Result<Self> {
        if min > max {
            return Err(AnnotationError::InvalidBounds { min, max });
        }

        Ok(GeneRecord {
            id: parse_gene_id(name, id_prefix_len)?,
            name: name.to_string(),
            min,
            max,
            chromosome: chromosome.to_string(),
        })
    }

    ///
    /// Parse a gene record from the four annotation fields
    /// `(name, min, max, chromosome)`.
    ///
    pub fn from_fields(fields: &[&str], id_prefix_len: usize) -> Result<Self> {
        let (name, min, max, chromosome) = match fields {
            [name, min, max, chromosome, ..] => (*name, *min, *max, *chromosome),
            _ => return Err(AnnotationError::MissingFields(fields.len())),
        };

        let min = parse_coordinate("min", min)?;
        let max = parse_coordinate("max", max)?;

        GeneRecord::new(name, min, max, chromosome, id_prefix_len)
    }

    ///
    /// Widen the bounds by `margin` on both sides, clamping at zero and at `u32::MAX`.
    ///
    pub fn pad(&mut self, margin: u32) {
        self.min = self.min.saturating_sub(margin);
        self.max = self.max.saturating_add(margin);
    }

    /// Whether `position` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, position: u32) -> bool {
        self.min <= position && position <= self.max
    }

    ///
    /// Get the number of positions covered by the record
    ///
    pub fn width(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.id, self.name, self.chromosome, self.min, self.max
        )
    }
}

impl Display for GeneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| AnnotationError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

///
/// Extract the numeric gene id that follows a fixed-length prefix.
///
/// # Arguments
/// - name: gene name, e.g. `FBgn0001234`
/// - prefix_len: number of leading characters to drop
///
pub fn parse_gene_id(name: &str, prefix_len: usize) -> Result<u64> {
    let suffix = name
        .char_indices()
        .nth(prefix_len)
        .map(|(idx, _)| &name[idx..])
        .ok_or_else(|| AnnotationError::InvalidGeneId(name.to_string()))?;

    suffix
        .parse::<u64>()
        .map_err(|_| AnnotationError::InvalidGeneId(name.to_string()))
}

impl TryFrom<&str> for GeneRecord {
    type Error = AnnotationError;

    ///
    /// Parse a single comma-delimited annotation line with the default id prefix.
    ///
    fn try_from(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split(',').map(str::trim).collect();
        GeneRecord::from_fields(&fields, DEFAULT_ID_PREFIX_LEN)
    }
}

use std::cmp::Ordering;

use num_traits::{PrimInt, Unsigned, identities::one};
use thiserror::Error;

use crate::traits::Span;

/// A cluster must hold more than this many members before it may be split early.
pub const PARTIAL_CLOSE_MIN_MEMBERS: usize = 3;

/// Errors that can occur when building an [`IntervalIndex`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// An interval index needs at least one record.
    #[error("Cannot build an interval index from an empty set of records")]
    EmptyIntervalSet,
}

/// One node of an [`IntervalIndex`]: a merged coordinate range and every record that
/// was clustered into it.
///
/// The bucket bounds are the union of its members' ranges, so a member does not
/// necessarily cover every position inside `[min, max]`.
#[derive(Debug, Clone)]
pub struct Bucket<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    /// Inclusive lower bound.
    pub min: I,
    /// Inclusive upper bound.
    pub max: I,
    /// Records merged into this bucket, ascending by `max_pos`.
    pub members: Vec<T>,
}

impl<I, T> Bucket<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    /// Where `position` falls relative to this bucket.
    #[inline]
    fn locate(&self, position: I) -> Ordering {
        if self.max < position {
            Ordering::Less
        } else if self.min > position {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// The open cluster of the build sweep. Never empty, and always sorted ascending by
/// `max_pos`.
struct Cluster<I, T> {
    lowest: I,
    members: Vec<T>,
}

impl<I, T> Cluster<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    fn new(record: T) -> Self {
        Cluster {
            lowest: record.min_pos(),
            members: vec![record],
        }
    }

    fn largest_max(&self) -> I {
        self.members[self.members.len() - 1].max_pos()
    }

    fn smallest_max(&self) -> I {
        self.members[0].max_pos()
    }

    /// Insert after any member with an equal `max_pos`.
    fn insert(&mut self, record: T) {
        let idx = self
            .members
            .partition_point(|m| m.max_pos() <= record.max_pos());
        self.members.insert(idx, record);
    }

    /// Emit the whole cluster as a bucket.
    fn close(self) -> Bucket<I, T> {
        let max = self.largest_max();
        Bucket {
            min: self.lowest,
            max,
            members: self.members,
        }
    }

    /// Emit a bucket ending just before `start`, then keep only the members that
    /// reach `start` or beyond. The new cluster begins at `start`.
    fn split_before(&mut self, start: I) -> Bucket<I, T> {
        let bucket = Bucket {
            min: self.lowest,
            max: start - one::<I>(),
            members: self.members.clone(),
        };

        self.members.retain(|m| m.max_pos() >= start);
        self.lowest = start;

        bucket
    }
}

/// A point-containment index over the records of one chromosome.
///
/// Records are padded once, sorted by start, and swept into non-overlapping
/// [`Bucket`]s. A query binary searches the bucket bounds and then checks only the
/// members of the single matching bucket, so its cost is bounded by the largest
/// cluster rather than by the number of records.
///
/// # Examples
///
/// ```
/// use genescan_core::models::GeneRecord;
/// use genescan_overlaprs::IntervalIndex;
///
/// let genes = vec![
///     GeneRecord::new("FBgn0000100", 100, 200, "2L", 4).unwrap(),
///     GeneRecord::new("FBgn0000101", 190, 300, "2L", 4).unwrap(),
/// ];
///
/// let index = IntervalIndex::build(genes, 5).unwrap();
/// assert_eq!(index.num_nodes(), 1);
///
/// let hits: Vec<u64> = index.find_iter(195).map(|g| g.id).collect();
/// assert_eq!(hits, vec![100, 101]);
/// assert_eq!(index.find_iter(50).count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct IntervalIndex<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    min: I,
    max: I,
    buckets: Vec<Bucket<I, T>>,
    num_records: usize,
}

impl<I, T> IntervalIndex<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    ///
    /// Build the index from every record of one chromosome.
    ///
    /// # Arguments
    /// - records: the records to index; each one is padded by `margin` first
    /// - margin: padding applied to both ends of every record
    ///
    /// # Returns
    /// - the index, or [`IndexError::EmptyIntervalSet`] when `records` is empty
    pub fn build(mut records: Vec<T>, margin: I) -> Result<Self, IndexError> {
        if records.is_empty() {
            return Err(IndexError::EmptyIntervalSet);
        }

        for record in records.iter_mut() {
            record.pad(margin);
        }

        let num_records = records.len();
        let (min, max) = records.iter().fold(
            (records[0].min_pos(), records[0].max_pos()),
            |(lo, hi), r| (lo.min(r.min_pos()), hi.max(r.max_pos())),
        );

        // stable, so records sharing a start keep their input order
        records.sort_by_key(|r| r.min_pos());

        let mut buckets: Vec<Bucket<I, T>> = Vec::new();
        let mut open: Option<Cluster<I, T>> = None;

        for record in records {
            let Some(mut cluster) = open.take() else {
                open = Some(Cluster::new(record));
                continue;
            };

            let start = record.min_pos();

            if cluster.largest_max() < start {
                // nothing in the cluster reaches this record
                buckets.push(cluster.close());
                open = Some(Cluster::new(record));
            } else if cluster.smallest_max() < start
                && cluster.members.len() > PARTIAL_CLOSE_MIN_MEMBERS
            {
                buckets.push(cluster.split_before(start));
                cluster.insert(record);
                open = Some(cluster);
            } else {
                cluster.insert(record);
                open = Some(cluster);
            }
        }

        if let Some(cluster) = open {
            buckets.push(cluster.close());
        }

        Ok(IntervalIndex {
            min,
            max,
            buckets,
            num_records,
        })
    }

    /// Return the members of the bucket that contains `position`.
    ///
    /// These are candidates only: use [`find_iter`](Self::find_iter) to get the
    /// records that actually cover `position`.
    pub fn find(&self, position: I) -> &[T] {
        if position < self.min || position > self.max {
            return &[];
        }

        match self.buckets.binary_search_by(|b| b.locate(position)) {
            Ok(idx) => &self.buckets[idx].members,
            Err(_) => &[],
        }
    }

    /// Iterate over the records whose span contains `position`.
    pub fn find_iter(&self, position: I) -> IterFind<'_, I, T> {
        IterFind {
            candidates: self.find(position).iter(),
            position,
        }
    }

    /// The number of buckets.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn buckets(&self) -> &[Bucket<I, T>] {
        &self.buckets
    }

    /// Lowest padded position covered by any record.
    #[inline]
    pub fn min(&self) -> I {
        self.min
    }

    /// Highest padded position covered by any record.
    #[inline]
    pub fn max(&self) -> I {
        self.max
    }

    /// The number of records the index was built from.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_records
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_records == 0
    }

    /// Size of the largest bucket, i.e. the most candidates a single query can scan.
    pub fn max_bucket_len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).max().unwrap_or(0)
    }
}

/// An iterator over the records of an [`IntervalIndex`] that contain one position.
///
/// Created by [`IntervalIndex::find_iter`]. It borrows the index and is cheap to
/// create, so a query is restarted by calling `find_iter` again.
#[derive(Debug, Clone)]
pub struct IterFind<'a, I, T> {
    candidates: std::slice::Iter<'a, T>,
    position: I,
}

impl<'a, I, T> IterFind<'a, I, T> {
    /// An iterator that yields nothing.
    pub fn empty(position: I) -> Self {
        IterFind {
            candidates: <&'a [T]>::default().iter(),
            position,
        }
    }
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Span<I> + Clone + Send + Sync,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let position = self.position;
        self.candidates.find(|m| m.contains(position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}

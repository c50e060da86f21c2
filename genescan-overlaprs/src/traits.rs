use num_traits::{PrimInt, Unsigned};

use genescan_core::models::GeneRecord;

///
/// A value that covers an inclusive `[min_pos, max_pos]` span on one coordinate axis.
///
/// Anything implementing `Span` can be stored in an
/// [`IntervalIndex`](crate::bucket_index::IntervalIndex).
///
pub trait Span<I>
where
    I: PrimInt + Unsigned + Send + Sync,
{
    /// Lowest covered position (inclusive).
    fn min_pos(&self) -> I;

    /// Highest covered position (inclusive).
    fn max_pos(&self) -> I;

    /// Widen the span by `margin` on both sides without wrapping.
    fn pad(&mut self, margin: I);

    #[inline]
    fn contains(&self, position: I) -> bool {
        self.min_pos() <= position && position <= self.max_pos()
    }
}

impl Span<u32> for GeneRecord {
    #[inline]
    fn min_pos(&self) -> u32 {
        self.min
    }

    #[inline]
    fn max_pos(&self) -> u32 {
        self.max
    }

    fn pad(&mut self, margin: u32) {
        GeneRecord::pad(self, margin)
    }
}

/// Length of the alphabetic prefix in gene names such as `FBgn0001234`.
pub const DEFAULT_ID_PREFIX_LEN: usize = 4;

/// Margin added on both sides of every gene before it is indexed.
pub const DEFAULT_PADDING_MARGIN: u32 = 5000;

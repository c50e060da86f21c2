/// Column of the numeric chromosome code in a plink association row.
pub const CHR_COL: usize = 0;
/// Column of the base-pair position.
pub const POS_COL: usize = 2;
/// Column of the effect-type tag (`ADD`, `COV1`, ...).
pub const TEST_COL: usize = 4;
/// Column of the p-value.
pub const P_COL: usize = 8;

pub const DEFAULT_EFFECT_TAG: &str = "ADD";
pub const DEFAULT_NA_SENTINEL: &str = "NA";

pub const DEFAULT_SCORE_FILE: &str = "tstat.txt";
pub const DEFAULT_SUMMARY_FILE: &str = "done.txt";

/// Combined-probability transform factor applied to each summed log10 p-value.
pub const FISHER_FACTOR: f64 = -2.0;

/// Numeric chromosome codes written by plink for the Drosophila genome.
pub const DEFAULT_CHROMOSOME_CODES: [(&str, &str); 6] = [
    ("1", "2L"),
    ("2", "2R"),
    ("3", "3L"),
    ("4", "3R"),
    ("5", "X"),
    ("6", "4"),
];

use std::fs::{File, copy, create_dir_all, read_to_string};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use rstest::*;

use genescan_core::models::AnnotationSet;
use genescan_overlaprs::{ChromosomeIndexSet, IntoChromosomeIndexSet};
use genescan_scoring::{
    AssocFileGlob, RunSummary, ScanConfig, ScoringError, score_assoc_file, score_batch,
};

#[fixture]
fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../tests/data")
}

#[fixture]
fn config(data_dir: PathBuf) -> ScanConfig {
    ScanConfig::try_from(data_dir.join("config/genescan.toml").as_path()).unwrap()
}

#[fixture]
fn index(data_dir: PathBuf, config: ScanConfig) -> ChromosomeIndexSet {
    let genes = AnnotationSet::from_path(
        &data_dir.join("annotation/genes.csv"),
        &config.annotation_options(),
    )
    .unwrap();
    genes
        .into_chromosome_index_set(config.padding_margin)
        .unwrap()
}

/// Copy the association runs into a scratch directory so outputs don't land in the repo.
fn stage_runs(data_dir: &Path, scratch: &Path) -> Vec<PathBuf> {
    ["run_a", "run_b"]
        .iter()
        .map(|run| {
            let dir = scratch.join(run);
            create_dir_all(&dir).unwrap();
            let dest = dir.join("plink.assoc.linear");
            copy(data_dir.join("assoc").join(run).join("plink.assoc.linear"), &dest).unwrap();
            dest
        })
        .collect()
}

#[rstest]
fn test_index_from_annotation(index: ChromosomeIndexSet) {
    assert_eq!(index.num_records(), 5);
    assert_eq!(index.len(), 2);

    // 2L:8000 sits in FBgn0031208 and in the padded span of FBgn0002121
    let mut ids: Vec<u64> = index.find_genes("2L", 8000).map(|g| g.id).collect();
    ids.sort();
    assert_eq!(ids, vec![2121, 31208]);

    assert_eq!(index.find_genes("2R", 8000).count(), 0);
    assert_eq!(index.find_genes("2L", 100000).count(), 0);
}

#[rstest]
fn test_single_run(data_dir: PathBuf, config: ScanConfig, index: ChromosomeIndexSet) {
    let path = data_dir.join("assoc/run_a/plink.assoc.linear");
    let result = score_assoc_file(&index, &path, &config).unwrap();

    let lines: Vec<String> = result.scores.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "2121\t6.000000",
            "31208\t4.000000",
            "31213\t2.000000",
            "263584\t2.000000",
        ]
    );

    assert_eq!(
        result.summary,
        RunSummary {
            rows_read: 8,
            rows_used: 5,
            unmapped_rows: 1,
            matches: 6,
            na_count: 1,
            genes_scored: 4,
        }
    );
}

#[rstest]
fn test_gzipped_run_matches_plain(data_dir: PathBuf, config: ScanConfig, index: ChromosomeIndexSet) {
    let plain = data_dir.join("assoc/run_a/plink.assoc.linear");
    let scratch = tempfile::tempdir().unwrap();
    let gz_path = scratch.path().join("plink.assoc.linear.gz");

    let mut encoder = GzEncoder::new(File::create(&gz_path).unwrap(), Compression::default());
    encoder
        .write_all(read_to_string(&plain).unwrap().as_bytes())
        .unwrap();
    encoder.finish().unwrap();

    let from_plain = score_assoc_file(&index, &plain, &config).unwrap();
    let from_gz = score_assoc_file(&index, &gz_path, &config).unwrap();
    assert_eq!(from_plain, from_gz);
}

#[rstest]
fn test_batch_writes_files_next_to_each_run(
    data_dir: PathBuf,
    config: ScanConfig,
    index: ChromosomeIndexSet,
) {
    let scratch = tempfile::tempdir().unwrap();
    stage_runs(&data_dir, scratch.path());

    let pattern = format!("{}/run_*/plink.assoc.linear", scratch.path().display());
    let files = AssocFileGlob::new(&pattern).unwrap();
    assert_eq!(files.len(), 2);

    let outcomes = score_batch(&index, files.files(), &config).unwrap();
    assert_eq!(outcomes.len(), 2);

    let tstat_a = read_to_string(scratch.path().join("run_a/tstat.txt")).unwrap();
    assert_eq!(
        tstat_a,
        "2121\t6.000000\n31208\t4.000000\n31213\t2.000000\n263584\t2.000000\n"
    );

    // run_b only hits genes through NA rows: no scores, but the NA count is kept
    let tstat_b = read_to_string(scratch.path().join("run_b/tstat.txt")).unwrap();
    assert_eq!(tstat_b, "");
    let done_b = read_to_string(scratch.path().join("run_b/done.txt")).unwrap();
    assert!(done_b.starts_with("NA Count: 2\n"));
    assert_eq!(outcomes[1].summary.genes_scored, 0);
}

#[rstest]
fn test_custom_code_table(data_dir: PathBuf, index: ChromosomeIndexSet) {
    // without code 1 every 2L row is unmapped
    let mut config = ScanConfig::default();
    config.chromosome_codes.remove("1");

    let path = data_dir.join("assoc/run_a/plink.assoc.linear");
    let result = score_assoc_file(&index, &path, &config).unwrap();

    assert!(result.scores.is_empty());
    assert_eq!(result.summary.unmapped_rows, 4);
    assert_eq!(result.summary.na_count, 1);
}

#[rstest]
fn test_zero_p_value_fails_the_run(index: ChromosomeIndexSet, config: ScanConfig) {
    let scratch = tempfile::tempdir().unwrap();
    let path = scratch.path().join("plink.assoc.linear");
    let mut file = File::create(&path).unwrap();
    writeln!(file, " CHR SNP BP A1 TEST NMISS BETA STAT P").unwrap();
    writeln!(file, "   1 2L_8000_SNP 8000 T ADD 198 0.1 0.8 0").unwrap();
    drop(file);

    let result = score_assoc_file(&index, &path, &config);
    assert!(matches!(
        result,
        Err(ScoringError::NonPositivePValue { .. })
    ));
}

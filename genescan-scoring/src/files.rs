use std::ffi::OsStr;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use glob::glob;

use crate::aggregator::GeneScore;
use crate::errors::{Result, ScoringError};

/// The association files matched by a glob pattern, in sorted order.
#[derive(Debug, Clone)]
pub struct AssocFileGlob {
    curr: usize,
    files: Vec<PathBuf>,
}

impl AssocFileGlob {
    pub fn new(pattern: &str) -> Result<Self> {
        let entries = glob(pattern).map_err(|e| ScoringError::GlobError(e.to_string()))?;
        let mut files = entries
            .map(|entry| entry.map_err(|e| ScoringError::GlobError(e.to_string())))
            .collect::<Result<Vec<_>>>()?;
        files.sort();

        Ok(AssocFileGlob { files, curr: 0 })
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Iterator for AssocFileGlob {
    type Item = PathBuf;
    fn next(&mut self) -> Option<Self::Item> {
        let result = self.files.get(self.curr).cloned();
        self.curr += 1;
        result
    }
}

///
/// Write `gene_id<TAB>score` lines. A path ending in `.gz` is gzip-compressed.
///
/// # Arguments
/// - path: the output file, parent directories are created
/// - scores: the scores, written in the given order
pub fn write_scores<P: AsRef<Path>>(path: P, scores: &[GeneScore]) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer: Box<dyn Write> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
    } else {
        Box::new(BufWriter::new(file))
    };

    for score in scores {
        writeln!(writer, "{}", score)?;
    }

    writer.flush()
}

/// The output file that sits next to an association file.
pub fn sibling_path(assoc_path: &Path, file_name: &str) -> PathBuf {
    match assoc_path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::read_to_string;
    use std::io::Read;

    use flate2::read::MultiGzDecoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn scores() -> Vec<GeneScore> {
        vec![
            GeneScore {
                gene_id: 31208,
                score: 6.0,
            },
            GeneScore {
                gene_id: 263584,
                score: 0.39794,
            },
        ]
    }

    #[rstest]
    fn test_write_scores_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/tstat.txt");

        write_scores(&path, &scores()).unwrap();

        let text = read_to_string(&path).unwrap();
        assert_eq!(text, "31208\t6.000000\n263584\t0.397940\n");
    }

    #[rstest]
    fn test_write_scores_gz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tstat.txt.gz");

        write_scores(&path, &scores()).unwrap();

        let mut text = String::new();
        MultiGzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("31208\t6.000000"));
    }

    #[rstest]
    fn test_write_no_scores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tstat.txt");

        write_scores(&path, &[]).unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "");
    }

    #[rstest]
    fn test_glob_is_sorted_and_iterable() {
        let dir = tempfile::tempdir().unwrap();
        for run in ["run_b", "run_a", "run_c"] {
            let run_dir = dir.path().join(run);
            create_dir_all(&run_dir).unwrap();
            File::create(run_dir.join("plink.assoc.linear")).unwrap();
        }
        File::create(dir.path().join("notes.txt")).unwrap();

        let pattern = format!("{}/*/plink.assoc.linear", dir.path().display());
        let files = AssocFileGlob::new(&pattern).unwrap();
        assert_eq!(files.len(), 3);

        let runs: Vec<String> = files
            .map(|p| {
                p.parent()
                    .unwrap()
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        assert_eq!(runs, vec!["run_a", "run_b", "run_c"]);
    }

    #[rstest]
    fn test_glob_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.assoc.linear", dir.path().display());
        let files = AssocFileGlob::new(&pattern).unwrap();
        assert!(files.is_empty());
    }

    #[rstest]
    fn test_invalid_pattern() {
        assert!(matches!(
            AssocFileGlob::new("runs/[.assoc"),
            Err(ScoringError::GlobError(_))
        ));
    }

    #[rstest]
    #[case("runs/r1/plink.assoc.linear", "tstat.txt", "runs/r1/tstat.txt")]
    #[case("plink.assoc.linear", "done.txt", "done.txt")]
    fn test_sibling_path(#[case] assoc: &str, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(sibling_path(Path::new(assoc), name), PathBuf::from(expected));
    }
}

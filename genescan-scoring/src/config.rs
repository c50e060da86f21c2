use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use genescan_core::consts::{DEFAULT_ID_PREFIX_LEN, DEFAULT_PADDING_MARGIN};
use genescan_core::models::AnnotationOptions;

use crate::consts::{
    DEFAULT_CHROMOSOME_CODES, DEFAULT_EFFECT_TAG, DEFAULT_NA_SENTINEL, DEFAULT_SCORE_FILE,
    DEFAULT_SUMMARY_FILE,
};
use crate::errors::ConfigError;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

///
/// Settings for one scan: how annotations are read and indexed, which association
/// rows are used, and where the results go. Every field has a default, so a TOML
/// file only needs to list what it changes.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    pub padding_margin: u32,
    pub id_prefix_len: usize,
    pub allow_header: bool,
    pub effect_tag: String,
    pub na_sentinel: String,
    pub chromosome_codes: BTreeMap<String, String>,
    pub score_file_name: String,
    pub summary_file_name: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            padding_margin: DEFAULT_PADDING_MARGIN,
            id_prefix_len: DEFAULT_ID_PREFIX_LEN,
            allow_header: true,
            effect_tag: DEFAULT_EFFECT_TAG.to_string(),
            na_sentinel: DEFAULT_NA_SENTINEL.to_string(),
            chromosome_codes: DEFAULT_CHROMOSOME_CODES
                .iter()
                .map(|(code, chr)| (code.to_string(), chr.to_string()))
                .collect(),
            score_file_name: DEFAULT_SCORE_FILE.to_string(),
            summary_file_name: DEFAULT_SUMMARY_FILE.to_string(),
        }
    }
}

impl ScanConfig {
    /// The annotation loader settings carried by this config.
    pub fn annotation_options(&self) -> AnnotationOptions {
        AnnotationOptions {
            id_prefix_len: self.id_prefix_len,
            allow_header: self.allow_header,
        }
    }

    /// Map a numeric plink chromosome code to its chromosome key.
    pub fn chromosome_for_code(&self, code: &str) -> Option<&str> {
        self.chromosome_codes.get(code).map(String::as_str)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.chromosome_codes.is_empty() {
            return Err(ConfigError::EmptyChromosomeCodes);
        }
        if self.score_file_name.is_empty() || self.summary_file_name.is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }
}

impl TryFrom<&Path> for ScanConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: ScanConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_defaults() {
        let config = ScanConfig::default();

        assert_eq!(config.padding_margin, 5000);
        assert_eq!(config.id_prefix_len, 4);
        assert_eq!(config.chromosome_for_code("1"), Some("2L"));
        assert_eq!(config.chromosome_for_code("6"), Some("4"));
        assert_eq!(config.chromosome_for_code("7"), None);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let file = write_config("padding_margin = 250\nna_sentinel = \"nan\"\n");
        let config = ScanConfig::try_from(file.path()).unwrap();

        assert_eq!(config.padding_margin, 250);
        assert_eq!(config.na_sentinel, "nan");
        assert_eq!(config.effect_tag, "ADD");
        assert_eq!(config.chromosome_codes.len(), 6);
    }

    #[rstest]
    fn test_custom_chromosome_codes_replace_defaults() {
        let file = write_config("[chromosome_codes]\n23 = \"X\"\n");
        let config = ScanConfig::try_from(file.path()).unwrap();

        assert_eq!(config.chromosome_for_code("23"), Some("X"));
        assert_eq!(config.chromosome_for_code("1"), None);
    }

    #[rstest]
    fn test_empty_chromosome_codes_are_rejected() {
        let file = write_config("[chromosome_codes]\n");
        let result = ScanConfig::try_from(file.path());

        assert!(matches!(result, Err(ConfigError::EmptyChromosomeCodes)));
    }

    #[rstest]
    fn test_invalid_toml() {
        let file = write_config("padding_margin = \"wide\"\n");
        let result = ScanConfig::try_from(file.path());

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[rstest]
    fn test_try_from_data_file() {
        let path = PathBuf::from("../tests/data/config/genescan.toml");
        let config = ScanConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.padding_margin, 5000);
        assert_eq!(config.score_file_name, "tstat.txt");
        assert_eq!(config.chromosome_for_code("5"), Some("X"));
    }
}

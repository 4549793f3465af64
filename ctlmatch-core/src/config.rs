//! Configuration loading from ctlmatch.toml.

use crate::error::{CtlmatchError, CtlmatchResult, IoResultExt};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Name of the optional configuration file in the base directory.
pub const CONFIG_FILE: &str = "ctlmatch.toml";

/// Default keyword list, relative to the base directory.
pub const DEFAULT_KEYWORD_FILE: &str = "data/keyword_file.txt";

/// Default control catalog, relative to the base directory.
pub const DEFAULT_CONTROL_CATALOG: &str = "data/NIST_SP-800-53_rev5_catalog_load.csv";

/// Default reference identifier list, relative to the base directory.
pub const DEFAULT_CONTROL_IDS_FILE: &str = "data/controls_ids.txt";

/// Default name of the catalog column holding the control text.
pub const DEFAULT_TEXT_COLUMN: &str = "control_text";

/// Main configuration structure for ctlmatch.toml. Every key is optional.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct CtlmatchConfig {
    /// Keyword list path.
    pub keyword_file: Option<PathBuf>,
    /// Control catalog (CSV) path.
    pub control_catalog: Option<PathBuf>,
    /// Reference identifier list path.
    pub control_ids_file: Option<PathBuf>,
    /// Catalog column holding the control text.
    pub text_column: Option<String>,
    /// Exclusive minimum number of distinct evidence strings.
    pub match_depth: Option<usize>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

impl CtlmatchConfig {
    /// Configured output format name, if any.
    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

/// Parses configuration text. `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> CtlmatchResult<CtlmatchConfig> {
    toml::from_str(content).map_err(|e| CtlmatchError::config(path, e.to_string()))
}

/// Loads configuration from ctlmatch.toml in `root` if it exists.
pub fn load_config(root: &Path) -> CtlmatchResult<Option<CtlmatchConfig>> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    parse_config(&content, &path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config(
            r#"
keyword_file = "kw.txt"
control_catalog = "catalog.csv"
control_ids_file = "ids.txt"
text_column = "statement"
match_depth = 4

[output]
format = "json"
"#,
            Path::new("ctlmatch.toml"),
        )
        .unwrap();

        assert_eq!(cfg.keyword_file, Some(PathBuf::from("kw.txt")));
        assert_eq!(cfg.text_column.as_deref(), Some("statement"));
        assert_eq!(cfg.match_depth, Some(4));
        assert_eq!(cfg.output_format(), Some("json"));
    }

    #[test]
    fn test_parse_empty_config() {
        let cfg = parse_config("", Path::new("ctlmatch.toml")).unwrap();
        assert_eq!(cfg, CtlmatchConfig::default());
        assert_eq!(cfg.output_format(), None);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = parse_config("match_depth = \"two\"", Path::new("ctlmatch.toml")).unwrap_err();
        assert!(matches!(err, CtlmatchError::Config { .. }));
    }

    #[test]
    fn test_negative_depth_rejected() {
        assert!(parse_config("match_depth = -1", Path::new("ctlmatch.toml")).is_err());
    }

    #[test]
    fn test_load_config_absent() {
        let dir = std::env::temp_dir().join("ctlmatch_config_absent_dir");
        assert_eq!(load_config(&dir).unwrap(), None);
    }
}

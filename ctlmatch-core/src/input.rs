//! Line-oriented inputs: the keyword list and the reference identifier list.
//!
//! Both files share one format: one entry per line, surrounding whitespace
//! stripped, blank lines ignored.

use crate::error::{CtlmatchResult, IoResultExt};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parses newline-delimited entries, stripping whitespace and skipping blanks.
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Loads the keyword list, keeping file order and duplicates.
pub fn load_keywords(path: &Path) -> CtlmatchResult<Vec<String>> {
    let content = fs::read_to_string(path).with_path(path)?;
    let keywords = parse_lines(&content);
    debug!(path = %path.display(), count = keywords.len(), "keywords loaded");
    Ok(keywords)
}

/// Loads the reference identifier list.
///
/// Returns the identifiers in file order (duplicates kept) so reports can
/// echo the list as imported; use [`reference_set`] for set semantics.
pub fn load_reference_ids(path: &Path) -> CtlmatchResult<Vec<String>> {
    let content = fs::read_to_string(path).with_path(path)?;
    let ids = parse_lines(&content);
    debug!(path = %path.display(), count = ids.len(), "reference identifiers loaded");
    Ok(ids)
}

/// Collapses identifiers into a set.
pub fn reference_set(ids: &[String]) -> BTreeSet<String> {
    ids.iter().cloned().collect()
}

/// SHA-256 of a file's bytes, hex encoded.
pub fn file_digest(path: &Path) -> CtlmatchResult<String> {
    let bytes = fs::read(path).with_path(path)?;
    let mut sha = Sha256::new();
    sha.update(&bytes);
    Ok(format!("{:x}", sha.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CtlmatchError;

    #[test]
    fn test_parse_lines_strips_and_skips_blanks() {
        let content = "  access control \n\n\tauthorize\n   \nleast privilege\r\n";
        assert_eq!(
            parse_lines(content),
            vec!["access control", "authorize", "least privilege"]
        );
    }

    #[test]
    fn test_parse_lines_keeps_duplicates_and_order() {
        assert_eq!(parse_lines("b\na\nb"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_reference_set_dedups() {
        let ids = parse_lines("AC-2\nAC-3\nAC-2\n");
        let set = reference_set(&ids);
        assert_eq!(set.len(), 2);
        assert!(set.contains("AC-2"));
    }

    #[test]
    fn test_file_digest() {
        let path = std::env::temp_dir().join(format!("ctlmatch_digest_{}.txt", std::process::id()));
        fs::write(&path, "abc").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("ctlmatch_no_such_dir/keywords.txt");
        let err = load_keywords(&path).unwrap_err();
        assert!(matches!(err, CtlmatchError::Io { .. }));
        assert_eq!(err.path(), Some(&path));
    }
}

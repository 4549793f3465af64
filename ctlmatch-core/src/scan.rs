//! Catalog scanning: runs every matcher over every control text and merges
//! the hits into one evidence set per control.
//!
//! Characteristics:
//! - Each control text is analyzed once; all matchers see the same `Doc`
//! - Evidence is the set of matched surface strings, deduplicated by exact
//!   text (`"Access Control"` and `"access control"` stay distinct)
//! - Controls without evidence are dropped, not recorded empty
//! - The first record error aborts the scan; no partial result is returned

use crate::catalog::ControlRecord;
use crate::error::CtlmatchResult;
use crate::matcher::Matcher;
use crate::nlp::{Doc, Pipeline};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Distinct matched surface strings for one control.
pub type MatchEvidence = BTreeSet<String>;

/// A control together with the evidence found in its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlMatch {
    #[serde(flatten)]
    pub record: ControlRecord,
    pub evidence: MatchEvidence,
}

impl ControlMatch {
    /// Number of distinct evidence strings.
    pub fn depth(&self) -> usize {
        self.evidence.len()
    }
}

/// Output of a catalog scan.
#[derive(Debug, Clone, Default)]
pub struct CatalogScan {
    /// Controls with non-empty evidence, in catalog order
    pub matches: Vec<ControlMatch>,
    /// Number of catalog rows read
    pub scanned: usize,
}

/// Unions the surface text of every hit from every matcher.
pub fn collect_evidence(doc: &Doc, matchers: &[&dyn Matcher]) -> MatchEvidence {
    matchers
        .iter()
        .flat_map(|m| m.matched_texts(doc))
        .map(String::from)
        .collect()
}

/// Scans `records` with `matchers`.
///
/// # Errors
///
/// Returns the first error yielded by `records` (for example a row missing
/// the text column). Rows after it are not read.
pub fn scan_catalog<P, I>(
    pipeline: &P,
    matchers: &[&dyn Matcher],
    records: I,
) -> CtlmatchResult<CatalogScan>
where
    P: Pipeline + ?Sized,
    I: IntoIterator<Item = CtlmatchResult<ControlRecord>>,
{
    let has_patterns = matchers.iter().any(|m| !m.is_empty());
    let mut scan = CatalogScan::default();

    for record in records {
        let record = record?;
        scan.scanned += 1;

        if !has_patterns {
            continue;
        }

        let doc = pipeline.analyze(&record.control_text);
        let evidence = collect_evidence(&doc, matchers);
        if evidence.is_empty() {
            continue;
        }

        debug!(
            identifier = record.identifier.as_deref().unwrap_or_default(),
            evidence = evidence.len(),
            "control matched"
        );
        scan.matches.push(ControlMatch { record, evidence });
    }

    info!(
        scanned = scan.scanned,
        with_evidence = scan.matches.len(),
        "catalog scan complete"
    );
    Ok(scan)
}

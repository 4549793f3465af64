//! Depth classification of scanned controls.
//!
//! A control counts as matched when it has *more than* `match_depth`
//! distinct evidence strings. The comparison is strict: with the default
//! depth of 2, a control needs at least 3.

use crate::scan::ControlMatch;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Default minimum-evidence threshold (exclusive).
pub const DEFAULT_MATCH_DEPTH: usize = 2;

/// `true` when `evidence_count` clears the exclusive `match_depth`.
#[inline]
pub fn exceeds_depth(evidence_count: usize, match_depth: usize) -> bool {
    evidence_count > match_depth
}

/// Controls that cleared the depth threshold.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    match_depth: usize,
    matched: Vec<ControlMatch>,
    below_depth: usize,
}

impl Classification {
    pub fn match_depth(&self) -> usize {
        self.match_depth
    }

    /// Matched controls, in scan order.
    pub fn matches(&self) -> &[ControlMatch] {
        &self.matched
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    /// Scanned controls that had evidence but not enough of it.
    pub fn below_depth(&self) -> usize {
        self.below_depth
    }

    /// Identifiers of matched controls. Controls without an identifier are
    /// left out; see [`Classification::unidentified`].
    pub fn identifiers(&self) -> BTreeSet<String> {
        self.matched
            .iter()
            .filter_map(|m| m.record.identifier.clone())
            .collect()
    }

    /// Identifiers in scan order, `None` for controls without one.
    pub fn identifier_list(&self) -> Vec<Option<&str>> {
        self.matched
            .iter()
            .map(|m| m.record.identifier.as_deref())
            .collect()
    }

    /// Number of matched controls that have no identifier.
    pub fn unidentified(&self) -> usize {
        self.matched
            .iter()
            .filter(|m| m.record.identifier.is_none())
            .count()
    }

    /// Catalog rows of the matched controls that have no identifier, in
    /// scan order. `None` for records that did not come from a catalog file.
    pub fn unidentified_rows(&self) -> Vec<Option<usize>> {
        self.matched
            .iter()
            .filter(|m| m.record.identifier.is_none())
            .map(|m| m.record.row)
            .collect()
    }

    /// Identifiers carried by more than one matched control.
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for id in self.matched.iter().filter_map(|m| m.record.identifier.as_deref()) {
            *counts.entry(id).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

/// Keeps the controls whose evidence count exceeds `match_depth`.
///
/// Pure, order-preserving filter. Since the scanner never emits controls
/// without evidence, a depth of 0 keeps everything.
pub fn classify(matches: Vec<ControlMatch>, match_depth: usize) -> Classification {
    let total = matches.len();
    let matched: Vec<ControlMatch> = matches
        .into_iter()
        .filter(|m| exceeds_depth(m.depth(), match_depth))
        .collect();

    let classification = Classification {
        match_depth,
        below_depth: total - matched.len(),
        matched,
    };

    let duplicates = classification.duplicate_identifiers();
    if !duplicates.is_empty() {
        warn!(identifiers = ?duplicates, "identifier shared by several matched controls");
    }
    info!(
        match_depth,
        matched = classification.len(),
        below_depth = classification.below_depth,
        "classification complete"
    );
    classification
}

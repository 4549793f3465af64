//! Reconciliation of discovered identifiers against a reference list.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::info;

/// Three-way partition of the union of the discovered and reference sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// In both sets
    pub agreement: BTreeSet<String>,
    /// Expected by the reference list but not discovered
    pub reference_only: BTreeSet<String>,
    /// Discovered but not in the reference list
    pub discovery_only: BTreeSet<String>,
}

impl Reconciliation {
    /// `agreement ∪ reference_only`: the reference set.
    pub fn reference(&self) -> BTreeSet<String> {
        self.agreement.union(&self.reference_only).cloned().collect()
    }

    /// `agreement ∪ discovery_only`: the discovered set.
    pub fn discovered(&self) -> BTreeSet<String> {
        self.agreement.union(&self.discovery_only).cloned().collect()
    }

    /// Size of the union of both input sets.
    pub fn total(&self) -> usize {
        self.agreement.len() + self.reference_only.len() + self.discovery_only.len()
    }

    /// `true` when discovery and reference agree exactly.
    pub fn is_exact(&self) -> bool {
        self.reference_only.is_empty() && self.discovery_only.is_empty()
    }
}

/// Splits `discovered` and `reference` into agreement and the two misses.
pub fn reconcile(discovered: &BTreeSet<String>, reference: &BTreeSet<String>) -> Reconciliation {
    let result = Reconciliation {
        agreement: discovered.intersection(reference).cloned().collect(),
        reference_only: reference.difference(discovered).cloned().collect(),
        discovery_only: discovered.difference(reference).cloned().collect(),
    };
    info!(
        agreement = result.agreement.len(),
        reference_only = result.reference_only.len(),
        discovery_only = result.discovery_only.len(),
        "reconciliation complete"
    );
    result
}

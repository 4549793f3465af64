//! Keyword matchers.
//!
//! Two strategies share one capability, the [`Matcher`] trait: take an
//! analyzed [`Doc`] and return token-span hits. The scanner works against
//! `&dyn Matcher`, so it does not know which strategy produced a hit.
//!
//! # Components
//!
//! - `phrase`: exact, case-insensitive surface matching ([`PhraseMatcher`])
//! - `lemma`: inflection-tolerant lemma-sequence matching ([`LemmaMatcher`])
//! - `keywords`: compiles a keyword list into both ([`build_matchers`])
//!
//! # Example Usage
//!
//! ```ignore
//! use ctlmatch_core::matcher::{build_matchers, Matcher};
//! use ctlmatch_core::nlp::{EnglishPipeline, Pipeline};
//!
//! let pipeline = EnglishPipeline::new();
//! let matchers = build_matchers(&pipeline, &["authorize".to_string()]);
//!
//! let doc = pipeline.analyze("Accounts are authorized by the owner.");
//! assert!(matchers.phrase.find_matches(&doc).is_empty());
//! assert_eq!(matchers.lemma.matched_texts(&doc), vec!["authorized"]);
//! ```

pub mod keywords;
pub mod lemma;
pub mod phrase;

pub use keywords::{build_matchers, KeywordMatchers};
pub use lemma::LemmaMatcher;
pub use phrase::PhraseMatcher;

use crate::nlp::{Doc, TokenAttr};
use std::collections::HashMap;

/// A single hit: tokens `start..end` of a document matched pattern `pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpanMatch {
    /// Token index of the first matched token
    pub start: usize,
    /// Token index one past the last matched token
    pub end: usize,
    /// Registration index of the pattern that matched
    pub pattern: usize,
}

/// Capability shared by every keyword matcher.
pub trait Matcher {
    /// Label the patterns were registered under.
    fn label(&self) -> &str;

    /// Number of registered patterns.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every hit in `doc`, overlapping hits included, sorted by span.
    fn find_matches(&self, doc: &Doc) -> Vec<SpanMatch>;

    /// Surface text of every hit, in hit order.
    fn matched_texts<'d>(&self, doc: &'d Doc) -> Vec<&'d str> {
        self.find_matches(doc)
            .into_iter()
            .filter_map(|m| doc.span_text(m.start, m.end))
            .collect()
    }
}

/// Token-sequence patterns compared against one token attribute.
///
/// Patterns are indexed by their first value, so a scan only checks the
/// patterns that can start at each token.
#[derive(Debug, Clone)]
pub(crate) struct SequencePatterns {
    attr: TokenAttr,
    patterns: Vec<Vec<String>>,
    by_first: HashMap<String, Vec<usize>>,
}

impl SequencePatterns {
    pub(crate) fn new(attr: TokenAttr) -> Self {
        Self {
            attr,
            patterns: Vec::new(),
            by_first: HashMap::new(),
        }
    }

    /// Registers a pattern. Empty sequences cannot match and are refused.
    pub(crate) fn add(&mut self, sequence: Vec<String>) -> Option<usize> {
        let first = sequence.first()?.clone();
        let id = self.patterns.len();
        self.patterns.push(sequence);
        self.by_first.entry(first).or_default().push(id);
        Some(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }

    pub(crate) fn pattern(&self, id: usize) -> Option<&[String]> {
        self.patterns.get(id).map(Vec::as_slice)
    }

    pub(crate) fn find(&self, doc: &Doc) -> Vec<SpanMatch> {
        if self.patterns.is_empty() {
            return Vec::new();
        }
        let values = doc.attrs(self.attr);
        let mut hits = Vec::new();

        for start in 0..values.len() {
            let Some(candidates) = self.by_first.get(values[start]) else {
                continue;
            };
            for &id in candidates {
                let pattern = &self.patterns[id];
                let end = start + pattern.len();
                if end > values.len() {
                    continue;
                }
                if values[start..end].iter().zip(pattern).all(|(v, p)| *v == p.as_str()) {
                    hits.push(SpanMatch {
                        start,
                        end,
                        pattern: id,
                    });
                }
            }
        }

        hits.sort_unstable();
        hits
    }
}

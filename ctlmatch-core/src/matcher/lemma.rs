//! Lemma-sequence ("fuzzy") matching.

use super::{Matcher, SequencePatterns, SpanMatch};
use crate::nlp::{Doc, TokenAttr};

/// Matches contiguous token runs whose lemmas equal a registered lemma
/// sequence. Tolerates inflection (`authorized` for `authorize`) but still
/// requires the same word count and order.
#[derive(Debug, Clone)]
pub struct LemmaMatcher {
    label: String,
    patterns: SequencePatterns,
}

impl LemmaMatcher {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            patterns: SequencePatterns::new(TokenAttr::Lemma),
        }
    }

    /// Registers the lemma sequence of an analyzed keyword.
    pub fn add(&mut self, keyword: &Doc) -> Option<usize> {
        self.add_lemmas(
            keyword
                .attrs(TokenAttr::Lemma)
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    /// Registers an explicit lemma sequence.
    pub fn add_lemmas(&mut self, lemmas: Vec<String>) -> Option<usize> {
        self.patterns.add(lemmas)
    }

    /// Lemma sequence of a registered pattern.
    pub fn pattern(&self, id: usize) -> Option<&[String]> {
        self.patterns.pattern(id)
    }
}

impl Matcher for LemmaMatcher {
    fn label(&self) -> &str {
        &self.label
    }

    fn len(&self) -> usize {
        self.patterns.len()
    }

    fn find_matches(&self, doc: &Doc) -> Vec<SpanMatch> {
        self.patterns.find(doc)
    }
}

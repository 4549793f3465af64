//! Exact phrase matching on the case-normalized surface form.

use super::{Matcher, SequencePatterns, SpanMatch};
use crate::nlp::{Doc, TokenAttr};

/// Matches contiguous token runs whose lowercase text equals a registered
/// phrase, word for word and in order. Inflected forms do not match.
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    label: String,
    patterns: SequencePatterns,
}

impl PhraseMatcher {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            patterns: SequencePatterns::new(TokenAttr::Lower),
        }
    }

    /// Registers a tokenized phrase. Returns its pattern index, or `None`
    /// when the phrase has no tokens.
    pub fn add(&mut self, phrase: &Doc) -> Option<usize> {
        self.patterns.add(
            phrase
                .attrs(TokenAttr::Lower)
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    /// Lowercase tokens of a registered phrase.
    pub fn pattern(&self, id: usize) -> Option<&[String]> {
        self.patterns.pattern(id)
    }
}

impl Matcher for PhraseMatcher {
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

//! Compiles a keyword list into the phrase and lemma matchers.

use super::{LemmaMatcher, Matcher, PhraseMatcher, SpanMatch};
use crate::nlp::Pipeline;
use tracing::{debug, warn};

/// Label the phrase patterns are registered under.
pub const PHRASE_LABEL: &str = "KEYWORDS";

/// Label the lemma patterns are registered under.
pub const LEMMA_LABEL: &str = "FUZZY_KEYWORDS";

/// The two matchers built from one keyword list.
///
/// Both are read-only after construction and can be reused for every
/// control text of a run.
#[derive(Debug, Clone)]
pub struct KeywordMatchers {
    pub phrase: PhraseMatcher,
    pub lemma: LemmaMatcher,
    /// Keywords in registration order; pattern ids index into this
    keywords: Vec<String>,
}

impl KeywordMatchers {
    /// Both matchers, for the scanner.
    pub fn as_slice(&self) -> [&dyn Matcher; 2] {
        [&self.phrase, &self.lemma]
    }

    /// Registered keywords, in pattern-id order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Keyword behind a hit from either matcher.
    pub fn keyword(&self, hit: &SpanMatch) -> Option<&str> {
        self.keywords.get(hit.pattern).map(String::as_str)
    }

    /// `true` when no keyword produced a pattern.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty() && self.lemma.is_empty()
    }
}

/// Builds both matchers from `keywords`.
///
/// Each keyword is analyzed once. Its lowercase tokens become a phrase
/// pattern and its lemmas a lemma pattern. Keywords are taken as-is: no
/// stopword filtering and no deduplication. A keyword with no tokens cannot
/// form a pattern and is skipped with a warning.
pub fn build_matchers<P>(pipeline: &P, keywords: &[String]) -> KeywordMatchers
where
    P: Pipeline + ?Sized,
{
    let mut phrase = PhraseMatcher::new(PHRASE_LABEL);
    let mut lemma = LemmaMatcher::new(LEMMA_LABEL);
    let mut registered = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        let doc = pipeline.analyze(keyword);
        if doc.is_empty() {
            warn!(keyword = %keyword, "keyword has no tokens; skipped");
            continue;
        }
        phrase.add(&doc);
        lemma.add(&doc);
        registered.push(keyword.clone());
    }

    debug!(
        keywords = keywords.len(),
        phrase_patterns = phrase.len(),
        lemma_patterns = lemma.len(),
        "matchers built"
    );

    KeywordMatchers {
        phrase,
        lemma,
        keywords: registered,
    }
}

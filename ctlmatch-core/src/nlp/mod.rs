//! Linguistic pipeline: tokenization and lemmatization.
//!
//! Matchers and the catalog scanner only see the [`Pipeline`] trait and the
//! [`Doc`] it produces. [`EnglishPipeline`] is the implementation the CLI
//! uses; tests are free to plug in their own.
//!
//! # Components
//!
//! - `tokenizer`: Unicode word-boundary tokenization with byte offsets
//! - `lemmatizer`: irregular-form table plus English inflection rules
//! - `english`: the two combined into a [`Pipeline`]

pub mod english;
pub mod lemmatizer;
pub mod tokenizer;

pub use english::EnglishPipeline;
pub use lemmatizer::Lemmatizer;
pub use tokenizer::{tokenize, RawToken};

/// A single analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form, exactly as it appears in the source text
    pub text: String,
    /// Case-normalized surface form
    pub lower: String,
    /// Dictionary base form (lowercase)
    pub lemma: String,
    /// Byte offset of the first character in the source text
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

/// Token attribute a pattern is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAttr {
    /// Case-normalized surface form
    Lower,
    /// Lemma
    Lemma,
}

impl Token {
    /// Returns the value of the given attribute.
    #[inline]
    pub fn attr(&self, attr: TokenAttr) -> &str {
        match attr {
            TokenAttr::Lower => &self.lower,
            TokenAttr::Lemma => &self.lemma,
        }
    }
}

/// An analyzed text: the original string plus its tokens in order.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
}

impl Doc {
    /// Builds a document from text and tokens whose offsets point into it.
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    /// The original text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the source text covered by tokens `start..end`.
    ///
    /// Whitespace between the tokens is kept as written. Returns `None` for
    /// an empty or out-of-range span.
    pub fn span_text(&self, start: usize, end: usize) -> Option<&str> {
        if start >= end || end > self.tokens.len() {
            return None;
        }
        let from = self.tokens[start].start;
        let to = self.tokens[end - 1].end;
        self.text.get(from..to)
    }

    /// Attribute values of every token, in order.
    pub fn attrs(&self, attr: TokenAttr) -> Vec<&str> {
        self.tokens.iter().map(|t| t.attr(attr)).collect()
    }
}

/// Anything that can turn raw text into an analyzed [`Doc`].
///
/// Implementations must be deterministic: the same text always yields the
/// same tokens, forms and lemmas. Matchers rely on this when they compare
/// keyword analyses against control-text analyses.
pub trait Pipeline {
    /// Tokenizes and lemmatizes `text`.
    fn analyze(&self, text: &str) -> Doc;
}

impl<P: Pipeline + ?Sized> Pipeline for &P {
    fn analyze(&self, text: &str) -> Doc {
        (**self).analyze(text)
    }
}

//! English pipeline: word-boundary tokenizer plus rule-based lemmatizer.

use super::{tokenize, Doc, Lemmatizer, Pipeline, Token};

/// The default [`Pipeline`] for English control catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPipeline {
    lemmatizer: Lemmatizer,
}

impl EnglishPipeline {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pipeline for EnglishPipeline {
    fn analyze(&self, text: &str) -> Doc {
        let tokens = tokenize(text)
            .into_iter()
            .map(|raw| Token {
                text: raw.text.to_string(),
                lower: raw.text.to_lowercase(),
                lemma: self.lemmatizer.lemmatize(raw.text),
                start: raw.start,
                end: raw.end,
            })
            .collect();
        Doc::new(text, tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::TokenAttr;

    #[test]
    fn test_analyze_forms() {
        let doc = EnglishPipeline::new().analyze("Authorized users Access controls.");
        assert_eq!(
            doc.attrs(TokenAttr::Lower),
            vec!["authorized", "users", "access", "controls", "."]
        );
        assert_eq!(
            doc.attrs(TokenAttr::Lemma),
            vec!["authorize", "user", "access", "control", "."]
        );
        assert_eq!(doc.tokens()[0].text, "Authorized");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let pipeline = EnglishPipeline::new();
        let a = pipeline.analyze("The organization monitors audit logs");
        let b = pipeline.analyze("The organization monitors audit logs");
        assert_eq!(a.tokens(), b.tokens());
    }

    #[test]
    fn test_analyze_empty_text() {
        let doc = EnglishPipeline::new().analyze("");
        assert!(doc.is_empty());
        assert_eq!(doc.text(), "");
    }
}

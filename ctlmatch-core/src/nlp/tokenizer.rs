//! Unicode word-boundary tokenization.
//!
//! Splits on UAX #29 word boundaries and drops whitespace-only segments, so
//! every word, number and punctuation mark becomes its own token:
//! `"AC-2 (a)"` → `AC`, `-`, `2`, `(`, `a`, `)`.
//!
//! A possessive clitic is split off the word it is attached to:
//! `"system's"` → `system`, `'s`.

use unicode_segmentation::UnicodeSegmentation;

/// Possessive endings split into their own token (ASCII and typographic
/// apostrophe).
const CLITICS: &[&str] = &["'s", "'S", "\u{2019}s", "\u{2019}S"];

/// A token before lemmatization: surface text and byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl<'a> RawToken<'a> {
    fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            start,
            end: start + text.len(),
        }
    }
}

/// Tokenizes `text` into non-whitespace word-boundary segments.
pub fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    let mut tokens = Vec::new();
    for (start, segment) in text.split_word_bound_indices() {
        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        match clitic_offset(segment) {
            Some(at) => {
                tokens.push(RawToken::new(&segment[..at], start));
                tokens.push(RawToken::new(&segment[at..], start + at));
            }
            None => tokens.push(RawToken::new(segment, start)),
        }
    }
    tokens
}

/// Byte offset of a trailing possessive clitic, if the segment has a word
/// in front of it.
fn clitic_offset(segment: &str) -> Option<usize> {
    CLITICS
        .iter()
        .find(|clitic| segment.len() > clitic.len() && segment.ends_with(*clitic))
        .map(|clitic| segment.len() - clitic.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            texts("Employ least privilege, including access."),
            vec!["Employ", "least", "privilege", ",", "including", "access", "."]
        );
    }

    #[test]
    fn test_hyphenated_identifier_splits() {
        assert_eq!(texts("AC-2 (a)"), vec!["AC", "-", "2", "(", "a", ")"]);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let input = "  multi-factor\tauthentication\n";
        for t in tokenize(input) {
            assert_eq!(&input[t.start..t.end], t.text);
        }
    }

    #[test]
    fn test_possessive_split_off() {
        assert_eq!(
            texts("The system's owner and the organization\u{2019}s policy."),
            vec![
                "The",
                "system",
                "'s",
                "owner",
                "and",
                "the",
                "organization",
                "\u{2019}s",
                "policy",
                "."
            ]
        );
    }

    #[test]
    fn test_possessive_offsets() {
        let input = "Owner's key";
        let tokens = tokenize(input);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 5));
        assert_eq!((tokens[1].start, tokens[1].end), (5, 7));
        assert_eq!(&input[tokens[1].start..tokens[1].end], "'s");
    }

    #[test]
    fn test_apostrophe_words_without_clitic_kept_whole() {
        assert_eq!(texts("don't users' it's"), vec!["don't", "users", "'", "it", "'s"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
    }
}

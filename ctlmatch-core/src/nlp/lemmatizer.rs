//! Rule-based English lemmatizer.
//!
//! Lookup order:
//! 1. Irregular-form table (`was` → `be`, `controlled` → `control`, ...)
//! 2. Noun plural / third-person rules (`-ies`, `-sses`, `-ches`, `-s`)
//! 3. Verb rules (`-ied`, `-ed`, `-ing`) with spelling repair: undoubling a
//!    final consonant (`scanned` → `scan`) or restoring a silent `e`
//!    (`authorized` → `authorize`, `scheduling` → `schedule`).
//!
//! Possessive `'s` never reaches the lemmatizer attached to a word; the
//! tokenizer splits it off.
//!
//! Lemmas are always lowercase. Only ASCII alphabetic words go through the
//! rules; numbers, punctuation and non-ASCII words are returned lowercased.
//! The rules target the vocabulary of control catalogs, not English at large;
//! what matters for matching is that a keyword and its inflected forms in
//! control text land on the same lemma.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Words shorter than this are never stripped of a suffix.
const MIN_STRIPPABLE_LEN: usize = 4;

/// Irregular forms and spellings the rules get wrong.
/// Format: (lemma, [forms...])
const IRREGULAR_FORMS: &[(&str, &[&str])] = &[
    ("be", &["am", "is", "are", "was", "were", "been", "being"]),
    ("have", &["has", "had", "having"]),
    ("do", &["does", "did", "done", "doing"]),
    ("go", &["goes", "went", "gone", "going"]),
    ("make", &["made"]),
    ("take", &["took", "taken"]),
    ("give", &["gave", "given"]),
    ("get", &["got", "gotten"]),
    ("write", &["wrote", "written", "writing"]),
    ("choose", &["chose", "chosen"]),
    ("know", &["knew", "known"]),
    ("see", &["saw", "seen"]),
    ("run", &["ran"]),
    ("send", &["sent"]),
    ("build", &["built"]),
    ("hold", &["held"]),
    ("keep", &["kept"]),
    ("leave", &["left"]),
    ("find", &["found"]),
    ("lead", &["led"]),
    ("child", &["children"]),
    ("person", &["people"]),
    ("add", &["added", "adding"]),
    ("agree", &["agreed", "agreeing"]),
    ("free", &["freed", "freeing"]),
    ("control", &["controlled", "controlling"]),
    ("create", &["created", "creating"]),
    ("delete", &["deleted", "deleting"]),
    ("complete", &["completed", "completing"]),
    ("store", &["stored", "storing"]),
    ("restore", &["restored", "restoring"]),
    ("ignore", &["ignored", "ignoring"]),
    ("explore", &["explored", "exploring"]),
    ("score", &["scored", "scoring"]),
    ("change", &["changed", "changing"]),
    ("exchange", &["exchanged", "exchanging"]),
    ("arrange", &["arranged", "arranging"]),
    ("challenge", &["challenged", "challenging"]),
    ("range", &["ranged", "ranging"]),
    ("scope", &["scoped", "scoping"]),
    ("escape", &["escaped", "escaping"]),
    ("focus", &["focused", "focusing", "focuses"]),
    ("cache", &["caches", "cached", "caching"]),
    ("hundred", &["hundreds"]),
    ("series", &["series"]),
    ("always", &["always"]),
    ("whereas", &["whereas"]),
    ("during", &["during"]),
];

static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (lemma, forms) in IRREGULAR_FORMS {
        table.insert(*lemma, *lemma);
        for form in forms.iter() {
            table.insert(*form, *lemma);
        }
    }
    table
});

/// English lemmatizer backed by the shared irregular-form table.
#[derive(Debug, Clone, Copy)]
pub struct Lemmatizer {
    irregular: &'static HashMap<&'static str, &'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: &IRREGULAR,
        }
    }

    /// Returns the lowercase lemma of a single token.
    pub fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some(lemma) = self.irregular.get(lower.as_str()) {
            return (*lemma).to_string();
        }

        if !is_ascii_word(&lower)
            || lower.len() < MIN_STRIPPABLE_LEN
            || lower.ends_with("thing")
        {
            return lower;
        }

        strip_plural(&lower)
            .or_else(|| strip_verb_suffix(&lower))
            .unwrap_or(lower)
    }
}

fn is_ascii_word(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}

#[inline]
fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

#[inline]
fn is_consonant(b: u8) -> bool {
    b.is_ascii_lowercase() && !is_vowel(b)
}

fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(|b| is_vowel(b) || b == b'y')
}

fn strip_plural(word: &str) -> Option<String> {
    if !word.ends_with('s') {
        return None;
    }
    if word.ends_with("ies") && word.len() > MIN_STRIPPABLE_LEN {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    if word.ends_with("sses")
        || word.ends_with("ches")
        || word.ends_with("shes")
        || word.ends_with("xes")
    {
        return Some(word[..word.len() - 2].to_string());
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    Some(word[..word.len() - 1].to_string())
}

fn strip_verb_suffix(word: &str) -> Option<String> {
    if word.ends_with("eed") {
        return None;
    }
    if word.ends_with("ied") {
        // tied -> tie, applied -> apply
        if word.len() == MIN_STRIPPABLE_LEN {
            return Some(word[..word.len() - 1].to_string());
        }
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    let (stem, suffix) = match word.strip_suffix("ing") {
        Some(stem) => (stem, "ing"),
        None => (word.strip_suffix("ed")?, "ed"),
    };
    if stem.len() < 2 || !has_vowel(stem) {
        return None;
    }
    // Not a participle: `hundred`, `sacred`
    if suffix == "ed" && ends_in_consonant_r(stem) {
        return None;
    }
    Some(repair_stem(stem))
}

fn ends_in_consonant_r(stem: &str) -> bool {
    match stem.as_bytes() {
        [.., prev, b'r'] => is_consonant(*prev) && *prev != b'r',
        _ => false,
    }
}

/// Repairs the spelling of a stem left behind by `-ed` / `-ing` removal.
fn repair_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    let last = bytes[n - 1];

    if bytes[n - 2] == last && is_consonant(last) && !matches!(last, b'l' | b's' | b'z' | b'f') {
        return stem[..n - 1].to_string();
    }
    if needs_silent_e(bytes) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn needs_silent_e(s: &[u8]) -> bool {
    let n = s.len();
    let last = s[n - 1];
    let prev = s[n - 2];
    let before = if n >= 3 { Some(s[n - 3]) } else { None };
    let before_is_consonant = before.is_some_and(is_consonant);

    if is_short_syllable(s) {
        return true;
    }

    match last {
        b'c' | b'v' | b'u' | b'z' => true,
        b's' => is_vowel(prev) || prev == b'y',
        b't' => match prev {
            b'a' => !matches!(before, Some(b'e' | b'o' | b'a')),
            b'u' => before_is_consonant && !s.ends_with(b"out"),
            b'o' => before_is_consonant,
            _ => false,
        },
        b'l' => {
            (is_consonant(prev) && !matches!(prev, b'l' | b'r'))
                || (matches!(prev, b'i' | b'u') && before_is_consonant)
        }
        b'g' => match prev {
            b'n' => false,
            p if is_consonant(p) => true,
            _ => before_is_consonant,
        },
        b'r' => {
            s.ends_with(b"uir") || (matches!(prev, b'u' | b'i' | b'a') && before_is_consonant)
        }
        b'd' | b'k' | b'm' => is_vowel(prev) && before_is_consonant,
        b'n' => prev == b'i' && before_is_consonant,
        _ => false,
    }
}

/// A stem of the shape VC (`us`) or CVC (`bas`, `hop`) where the final
/// consonant is not `w`, `x` or `y`.
fn is_short_syllable(s: &[u8]) -> bool {
    let final_ok = |b: u8| is_consonant(b) && !matches!(b, b'w' | b'x' | b'y');
    match s {
        [v, c] => is_vowel(*v) && final_ok(*c),
        [c1, v, c2] => is_consonant(*c1) && is_vowel(*v) && final_ok(*c2),
        _ => false,
    }
}

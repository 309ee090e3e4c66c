//! Key normalization shared by persistence, media reuse, and notification keys.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a word for use in a persistence or lookup key: NFKC, lower-case,
/// strip combining marks, then keep only `[a-z0-9']`.
///
/// The reference Python implementation's regex (`[^a-z0-9]`) strips
/// apostrophes too; this normalization follows the explicit invariant instead
/// (`keep [a-z0-9'] only`) and preserves them, so `"don't"` normalizes to
/// `"don't"` rather than `"dont"`.
pub fn normalize_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    let nfkc: String = lowered.nfkc().collect();
    nfkc.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == '\'')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize_word("Hello, World!"), "helloworld");
    }

    #[test]
    fn keeps_apostrophes() {
        assert_eq!(normalize_word("don't"), "don't");
    }

    #[test]
    fn strips_combining_accents() {
        assert_eq!(normalize_word("café"), "cafe");
        assert_eq!(normalize_word("Español"), "espanol");
        assert_eq!(normalize_word("Haus"), "haus");
    }

    #[test]
    fn is_idempotent() {
        for word in ["café", "don't", "Construir", "naïve-ish"] {
            let once = normalize_word(word);
            let twice = normalize_word(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn empty_and_whitespace_normalize_to_empty() {
        assert_eq!(normalize_word(""), "");
        assert_eq!(normalize_word("   "), "");
    }
}

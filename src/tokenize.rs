//! Treebank-style tokenisation of raw context text.
//!
//! A deliberately small rule tokenizer: punctuation is split from adjacent
//! word characters, clitics come off their host token, and a span-final
//! period becomes its own token while interior periods (abbreviations,
//! version numbers) stay attached. Hyphenated terms are kept whole.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Punctuation split from surrounding text wherever it occurs.
    static ref PUNCT: Regex = Regex::new(r#"([,;:!?"()\[\]{}/])"#).unwrap();
    // Negation contractions and possessive/auxiliary clitics.
    static ref CLITIC: Regex = Regex::new(r"(?i)(n't|'re|'ve|'ll|'d|'m|'s)(\s|$)").unwrap();
    // Only a span-final period is a token of its own.
    static ref FINAL_PERIOD: Regex = Regex::new(r"\.\s*$").unwrap();
}

/// Tokenize `text` into its ordered token sequence. Empty input yields an
/// empty sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let spaced = PUNCT.replace_all(text, " $1 ");
    let spaced = FINAL_PERIOD.replace_all(&spaced, " .");
    let spaced = CLITIC.replace_all(&spaced, " $1$2");

    spaced.split_whitespace().map(str::to_owned).collect()
}

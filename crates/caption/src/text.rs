//! Text measures and punctuation predicates shared by the wrapper and the
//! rechunker.

use std::sync::LazyLock;

use regex::Regex;

/// Terminal sentence punctuation, possibly repeated ("?!", "...").
static END_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?…]+$").unwrap());

/// Soft-pause punctuation: comma, colon, semicolon, em-dash, hyphen.
static SOFT_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,:;—-]$").unwrap());

/// Abbreviations a sentence-boundary heuristic must not split after.
static ABBREV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(mr|mrs|ms|dr|st|sr|jr|vs|etc|e\.g|i\.e|u\.s)\.?$").unwrap());

/// Numeric, currency and percentage tokens ("3.5%", "$1,200", "24/7").
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$?\d[\d,.\-/]*%?$").unwrap());

pub fn ends_terminal(text: &str) -> bool {
    END_PUNCT.is_match(text)
}

pub fn ends_soft_pause(text: &str) -> bool {
    SOFT_PUNCT.is_match(text)
}

/// Tokens that look like sentence boundaries but aren't: "Dr.", "U.S.",
/// "etc.", "3.5%". Splitting right after one reads as a mistake.
pub fn is_no_split_token(text: &str) -> bool {
    ABBREV.is_match(text) || NUMBER.is_match(text)
}

/// Unicode scalar count; caption limits are in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

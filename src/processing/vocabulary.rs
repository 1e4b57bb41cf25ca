//! Term vocabulary extraction
//!
//! Mirrors what a term-frequency vectorizer fit on a single document would
//! index: lowercase runs of two or more word characters, no stemming.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid term regex"));

/// Distinct terms a vectorizer fit on `text` alone would contain.
pub fn term_vocabulary(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

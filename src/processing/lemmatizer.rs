//! Dictionary-free noun lemmatizer
//!
//! Reduces plural nouns to their base form using the WordNet noun detachment
//! rules, guarded by an exception table for irregular plurals and a list of
//! words that only look plural. Endings that mostly belong to singular words
//! (`-as`, `-os`, `-ys`, `-ics`) are left alone unless the word is a known
//! plural.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static IRREGULAR_PLURALS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("children", "child"),
        ("people", "person"),
        ("men", "man"),
        ("women", "woman"),
        ("chairmen", "chairman"),
        ("salesmen", "salesman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("analyses", "analysis"),
        ("hypotheses", "hypothesis"),
        ("theses", "thesis"),
        ("diagnoses", "diagnosis"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("curricula", "curriculum"),
        ("media", "medium"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        // regular plurals behind the guarded endings
        ("ideas", "idea"),
        ("areas", "area"),
        ("schemas", "schema"),
        ("personas", "persona"),
        ("formulas", "formula"),
        ("videos", "video"),
        ("photos", "photo"),
        ("repos", "repo"),
        ("scenarios", "scenario"),
        ("portfolios", "portfolio"),
        ("ratios", "ratio"),
        ("studios", "studio"),
        ("days", "day"),
        ("ways", "way"),
        ("keys", "key"),
        ("arrays", "array"),
        ("surveys", "survey"),
        ("displays", "display"),
        ("gateways", "gateway"),
        ("holidays", "holiday"),
        ("journeys", "journey"),
        ("metrics", "metric"),
        ("topics", "topic"),
        ("heuristics", "heuristic"),
        ("characteristics", "characteristic"),
        ("clinics", "clinic"),
        ("basics", "basic"),
    ]
    .into_iter()
    .collect()
});

static INVARIANT_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "news", "series", "species", "means", "always", "perhaps", "whereas", "kubernetes",
        "jenkins", "devops", "mathematics", "physics", "economics", "ethics", "logistics",
        "postgres", "sales", "headquarters", "whereabouts", "graphics", "electronics", "wales",
        "express", "ios", "windows",
    ]
    .into_iter()
    .collect()
});

/// Noun lemmatizer; stateless apart from its static tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Return the dictionary base form of a lowercase word.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = IRREGULAR_PLURALS.get(word) {
            return base.to_string();
        }

        if word.chars().count() <= 3 || INVARIANT_WORDS.contains(word) {
            return word.to_string();
        }

        if !word.ends_with('s') || Self::looks_singular(word) {
            return word.to_string();
        }

        Self::detach_suffix(word)
    }

    fn looks_singular(word: &str) -> bool {
        ["ss", "us", "is", "as", "os", "ys", "ics"]
            .iter()
            .any(|ending| word.ends_with(ending))
    }

    fn detach_suffix(word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return format!("{}y", stem);
            }
        }

        // -sses, -xes, -zzes, -ches, -shes drop "es"
        for suffix in ["sses", "xes", "zzes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        word[..word.len() - 1].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("skills"), "skill");
        assert_eq!(lemmatizer.lemmatize("years"), "year");
        assert_eq!(lemmatizer.lemmatize("algorithms"), "algorithm");
        assert_eq!(lemmatizer.lemmatize("databases"), "database");
    }

    #[test]
    fn test_suffix_rules() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("companies"), "company");
        assert_eq!(lemmatizer.lemmatize("processes"), "process");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("branches"), "branch");
        assert_eq!(lemmatizer.lemmatize("dashes"), "dash");
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("children"), "child");
        assert_eq!(lemmatizer.lemmatize("women"), "woman");
        assert_eq!(lemmatizer.lemmatize("analyses"), "analysis");
    }

    #[test]
    fn test_words_left_unchanged() {
        let lemmatizer = Lemmatizer::new();
        for word in [
            "business", "status", "analysis", "python", "learning", "aws", "kubernetes", "postgres",
            "bias", "canvas", "pandas", "analytics", "statistics", "macos", "windows", "sales",
        ] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_known_plurals_behind_singular_endings() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("ideas"), "idea");
        assert_eq!(lemmatizer.lemmatize("videos"), "video");
        assert_eq!(lemmatizer.lemmatize("days"), "day");
        assert_eq!(lemmatizer.lemmatize("metrics"), "metric");
    }
}

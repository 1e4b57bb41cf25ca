//! Text normalization: tokenize, filter, lemmatize

use crate::processing::lemmatizer::Lemmatizer;
use log::warn;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// Domain terms kept even when they would otherwise be filtered.
pub const DEFAULT_ALLOW_LIST: &[&str] = &[
    "python",
    "machinelearning",
    "ai",
    "deeplearning",
    "automation",
    "nlp",
    "neuralnetworks",
    "computervision",
    "datascience",
    "algorithms",
    "tensorflow",
    "pytorch",
    "research",
    "development",
    "optimization",
    "classification",
    "regression",
];

/// NLTK English stopword corpus
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

pub struct TextProcessor {
    allow_list: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    /// Processor with the built-in domain allow-list
    pub fn new() -> Self {
        Self::with_allow_list(DEFAULT_ALLOW_LIST.iter().map(|s| s.to_string()))
    }

    pub fn with_allow_list<I, S>(allow_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_list: allow_list
                .into_iter()
                .map(|term| term.into().to_lowercase())
                .collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Normalize raw text into space-joined lemmas.
    ///
    /// Returns an empty string when the input has no content; callers treat
    /// that as "no usable text" rather than an error.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            warn!("No valid text found for preprocessing");
            return String::new();
        }

        self.tokenize(text)
            .into_iter()
            .map(|token| self.lemmatizer.lemmatize(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase word tokens that are purely alphabetic and not stopwords.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        lowered
            .unicode_words()
            .filter(|word| word.chars().all(char::is_alphabetic))
            .filter(|word| !STOP_WORDS.contains(*word) || self.allow_list.contains(*word))
            .map(str::to_string)
            .collect()
    }
}

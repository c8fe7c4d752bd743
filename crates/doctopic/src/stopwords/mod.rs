//! Stopword list: the single source of truth for text cleanup.
//!
//! One standard English stoplist plus the web-noise tokens that dominate
//! scraped corpora (`http`, `https`, `amp`, `com`). Every consumer - text
//! cleanup, keyword filtering, noun-phrase chunking - reads from here; there
//! are no per-module copies.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Corpus-specific additions to the standard English list.
pub const EXTRA_STOPWORDS: &[&str] = &["http", "https", "amp", "com"];

/// Standard English stoplist (NLTK's list, including the bare contraction
/// stems its tokenizer produces: "don", "shouldn", "ve", ...).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren",
    "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn",
    "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
];

static STOPWORDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOPWORDS
        .iter()
        .chain(EXTRA_STOPWORDS.iter())
        .copied()
        .collect()
});

/// The combined stopword set.
pub fn stopword_set() -> &'static AHashSet<&'static str> {
    &STOPWORDS
}

/// Whether a (lowercase) token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

//! Text post-processing: stopword cleanup and truncation.

use crate::stopwords::stopword_set;
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker appended to truncated text.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("static word regex"));

/// Lowercase, tokenize on word boundaries, drop stopwords, rejoin with single
/// spaces.
///
/// Pure and English-only. Applying it to already-cleaned text is a no-op.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stopwords = stopword_set();

    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !stopwords.contains(*word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Return the text unchanged when it fits in `max_chars` characters,
/// otherwise the first `max_chars` characters plus [`TRUNCATION_MARKER`].
///
/// Counts characters, not bytes, and has no word-boundary awareness: a cut
/// may land mid-word.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

//! Stop-word tokenizer used by field classification and relevance scoring

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Tokens at or below this character count are discarded.
const MIN_TOKEN_CHARS: usize = 3;

lazy_static! {
    /// Common words that carry no topical signal.
    static ref STOP_WORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for word in &[
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
            "of", "with", "by",
        ] {
            set.insert(*word);
        }
        set
    };
}

/// Extract the meaningful words from free text.
///
/// Lowercases the input, treats punctuation as separators, splits on
/// whitespace, and drops stop words and tokens of three characters or
/// fewer. Output order is unspecified; callers needing determinism sort the
/// result themselves.
pub fn extract_important_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() > MIN_TOKEN_CHARS && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

//! Flesch-style reading-ease estimate
//!
//! ```text
//! ease = 206.835 - 1.015 × (words / sentences) - 84.6 × (syllables / words)
//! ```
//!
//! Syllables are approximated by counting vowel groups after dropping a
//! silent trailing suffix. Digit-only tokens count as one syllable.

use regex::Regex;
use std::sync::OnceLock;

/// Returned when there is nothing to measure
pub const NEUTRAL_EASE: f64 = 50.0;

static WORD: OnceLock<Regex> = OnceLock::new();
static SENTENCE: OnceLock<Regex> = OnceLock::new();
static SILENT_SUFFIX: OnceLock<Regex> = OnceLock::new();
static VOWEL_GROUP: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD.get_or_init(|| Regex::new(r"[a-z0-9'’]+").unwrap())
}

fn sentence_regex() -> &'static Regex {
    SENTENCE.get_or_init(|| Regex::new(r"[^.!?]+[.!?]*").unwrap())
}

fn silent_suffix_regex() -> &'static Regex {
    SILENT_SUFFIX.get_or_init(|| {
        // consonant + "es", "ed", or consonant + silent "e"
        Regex::new(r"(?:[b-df-hj-np-tv-xz]es|ed|[b-df-hj-np-tv-xz]e)$").unwrap()
    })
}

fn vowel_group_regex() -> &'static Regex {
    VOWEL_GROUP.get_or_init(|| Regex::new(r"[aeiouy]+").unwrap())
}

/// Lower-cased word tokens
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    word_regex()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sentence segments. Text without any segment is one sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let found: Vec<&str> = sentence_regex().find_iter(text).map(|m| m.as_str()).collect();
    if found.is_empty() && !text.is_empty() {
        return vec![text];
    }
    found
}

/// Approximate syllable count, never less than 1
pub fn syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let stem = silent_suffix_regex().replace(&lower, "");
    vowel_group_regex().find_iter(&stem).count().max(1)
}

/// Reading-ease estimate for `text`.
///
/// Unclamped: pathological input can land below 0 or above 100.
pub fn estimate(text: &str) -> f64 {
    let words = words(text);
    let sentence_count = sentences(text).len();
    if words.is_empty() || sentence_count == 0 {
        return NEUTRAL_EASE;
    }

    let word_count = words.len() as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    let words_per_sentence = word_count / sentence_count as f64;
    let syllables_per_word = syllable_count as f64 / word_count;
    206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}

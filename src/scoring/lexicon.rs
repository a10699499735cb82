//! Fixed lexical dictionaries used by the scoring engine
//!
//! All patterns match whole words, case-insensitively. They are domain
//! knowledge, not user settings.

use regex::Regex;
use std::sync::OnceLock;

static SUBSTANCE: OnceLock<Regex> = OnceLock::new();
static REASONING: OnceLock<Regex> = OnceLock::new();
static CLICKBAIT: OnceLock<Regex> = OnceLock::new();

fn substance_regex() -> &'static Regex {
    SUBSTANCE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:[0-9]+|v[0-9]+|params?|paper|arxiv|benchmark|sota|roc|auc|cross-?val|ablation|weights|checkpoint|lora|rag|inference|latency|throughput|cuda|tpu|quant(?:ization)?|int8|fp16|fp8)\b",
        )
        .unwrap()
    })
}

fn reasoning_regex() -> &'static Regex {
    REASONING.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:why|because|therefore|however|whereas|evidence|limitations|trade[- ]?offs?)\b",
        )
        .unwrap()
    })
}

fn clickbait_regex() -> &'static Regex {
    CLICKBAIT.get_or_init(|| {
        Regex::new(r"(?i)\b(?:you won['’]t believe|shocking|insane|game[- ]?changer|must[- ]?see)\b")
            .unwrap()
    })
}

/// Numbers, version markers, or technical/statistical vocabulary
pub fn has_substance(text: &str) -> bool {
    substance_regex().is_match(text)
}

/// Causal or argumentative connectives
pub fn has_reasoning(text: &str) -> bool {
    reasoning_regex().is_match(text)
}

/// Sensationalist phrasing
pub fn is_clickbait(text: &str) -> bool {
    clickbait_regex().is_match(text)
}

//! Additive scoring model

use serde::Serialize;

use super::lexicon::{has_reasoning, has_substance, is_clickbait};
use crate::models::Record;
use crate::readability;

const TITLE_BONUS: f64 = 10.0;
const SUBSTANCE_BONUS: f64 = 15.0;
const POINTS_PER_LINK: f64 = 5.0;
const MAX_LINK_BONUS: f64 = 20.0;
const REASONING_BONUS: f64 = 10.0;
const CLICKBAIT_PENALTY: f64 = 10.0;
const TAG_BONUS: f64 = 5.0;
const REPLY_BONUS: f64 = 5.0;
const APPROVAL_BONUS: f64 = 5.0;

/// Reading ease that earns the full readability contribution
const TARGET_EASE: f64 = 55.0;
const MAX_READABILITY: f64 = 20.0;
const REPLY_THRESHOLD: u64 = 10;
const APPROVAL_THRESHOLD: u64 = 50;

/// Every term of the score, before clamping and rounding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub title_length: f64,
    pub substance: f64,
    pub references: f64,
    /// Raw reading-ease estimate the readability term was derived from
    pub reading_ease: f64,
    pub readability: f64,
    pub reasoning: f64,
    /// Zero or negative
    pub clickbait: f64,
    pub tag: f64,
    pub replies: f64,
    pub approvals: f64,
}

impl ScoreBreakdown {
    /// Unclamped sum of all terms
    pub fn raw_total(&self) -> f64 {
        self.title_length
            + self.substance
            + self.references
            + self.readability
            + self.reasoning
            + self.clickbait
            + self.tag
            + self.replies
            + self.approvals
    }

    /// Final score: clamped to 0..=100, rounded half-up
    pub fn score(&self) -> u8 {
        let total = self.raw_total();
        if total.is_nan() {
            return 0;
        }
        (total.clamp(0.0, 100.0) + 0.5).floor() as u8
    }
}

/// Compute every scoring term for `record`
pub fn breakdown(record: &Record, min_title_chars: u32) -> ScoreBreakdown {
    let title = record.title.as_str();
    let body = record.body.as_str();

    let title_length = if title.chars().count() >= min_title_chars as usize {
        TITLE_BONUS
    } else {
        0.0
    };

    let substance = if has_substance(&format!("{} {}", title, body)) {
        SUBSTANCE_BONUS
    } else {
        0.0
    };

    let references = (POINTS_PER_LINK * f64::from(record.external_link_count)).min(MAX_LINK_BONUS);

    let reading_ease = readability::estimate(&format!("{}. {}", title, body));
    let deviation = (reading_ease - TARGET_EASE).abs();
    let readability = ((100.0 - 2.0 * deviation) / 5.0).clamp(0.0, MAX_READABILITY);

    let reasoning = if has_reasoning(body) { REASONING_BONUS } else { 0.0 };
    let clickbait = if is_clickbait(title) {
        -CLICKBAIT_PENALTY
    } else {
        0.0
    };
    let tag = if record.tag_present { TAG_BONUS } else { 0.0 };
    let replies = if record.reply_count > REPLY_THRESHOLD {
        REPLY_BONUS
    } else {
        0.0
    };
    let approvals = if record.approval_count > APPROVAL_THRESHOLD {
        APPROVAL_BONUS
    } else {
        0.0
    };

    ScoreBreakdown {
        title_length,
        substance,
        references,
        reading_ease,
        readability,
        reasoning,
        clickbait,
        tag,
        replies,
        approvals,
    }
}

/// Quality score for `record` in `0..=100`
pub fn score(record: &Record, min_title_chars: u32) -> u8 {
    breakdown(record, min_title_chars).score()
}

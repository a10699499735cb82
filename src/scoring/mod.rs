//! Heuristic quality scoring
//!
//! Maps a [`Record`](crate::models::Record) to an integer score in `0..=100`
//! from surface signals only. The only configuration input is the minimum
//! title length.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = round(clamp(sum of terms, 0, 100))
//!
//!   Title length      +10  title has at least min_title_chars characters
//!   Substance         +15  title/body mention technical vocabulary or numbers
//!   References        +5 per external link, capped at +20
//!   Readability       0..20  (100 - 2 × |ease - 55|) / 5, clamped
//!   Reasoning         +10  body uses causal / argumentative connectives
//!   Clickbait         -10  title uses sensationalist phrasing
//!   Tag               +5   a category tag is attached
//!   Replies           +5   more than 10 replies
//!   Approvals         +5   more than 50 approvals
//! ```
//!
//! # Example
//!
//! A 30-character title, a body of "This benchmark shows SOTA throughput
//! with 3 references", 3 links, a tag, 20 replies and 100 approvals:
//!
//! 10 + 15 + 15 + 13.73 (ease 70.67) + 5 + 5 + 5 = 68.73 → **69**

mod engine;
pub mod lexicon;

pub use engine::{breakdown, score, ScoreBreakdown};

//! `aiq score` and `aiq readability` - one-off scoring

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

use aiq::models::{Decision, Record, Verdict};
use aiq::ownership::ViewerIdentity;
use aiq::policy::decide;
use aiq::readability;
use aiq::scoring::{breakdown, ScoreBreakdown};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreOutput<'a> {
    score: u8,
    decision: Decision,
    is_own: bool,
    badge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a ScoreBreakdown>,
}

/// Read a record from a JSON file
pub fn load_record(path: &Path) -> Result<Record> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid record in {}", path.display()))
}

pub fn run(
    settings: Option<&Path>,
    record: &Record,
    min_title_chars: Option<u32>,
    viewer: Option<String>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let config = super::config::load(settings);
    let min_title_chars = min_title_chars.unwrap_or(config.min_title_chars);

    let terms = breakdown(record, min_title_chars);
    let score = terms.score();
    let is_own = ViewerIdentity::new(viewer, config.manual_viewer_handle.clone())
        .owns(&record.author_handle);
    let decision = decide(score, is_own, record.tag_present, &config);
    let badge = Verdict::badge_text(score, is_own);

    if json {
        let output = ScoreOutput {
            score,
            decision,
            is_own,
            badge,
            breakdown: explain.then_some(&terms),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let decision_styled = match decision {
        Decision::Visible => style(decision.to_string()).green(),
        Decision::Dimmed => style(decision.to_string()).yellow(),
        Decision::Suppressed => style(decision.to_string()).red(),
    };
    println!("{}  {}", style(&badge).bold(), decision_styled);

    if explain {
        print_breakdown(&terms);
    }
    Ok(())
}

fn print_breakdown(terms: &ScoreBreakdown) {
    println!();
    let row = |name: &str, value: f64| {
        let value = if value < 0.0 {
            style(format!("{:>8.3}", value)).red()
        } else if value > 0.0 {
            style(format!("{:>8.3}", value)).green()
        } else {
            style(format!("{:>8.3}", value)).dim()
        };
        println!("  {:<14} {}", name, value);
    };
    row("title length", terms.title_length);
    row("substance", terms.substance);
    row("references", terms.references);
    row("readability", terms.readability);
    row("reasoning", terms.reasoning);
    row("clickbait", terms.clickbait);
    row("tag", terms.tag);
    row("replies", terms.replies);
    row("approvals", terms.approvals);
    println!("  {}", style("──────────────────────────").dim());
    println!(
        "  {:<14} {:>8.3}  {}",
        "total",
        terms.raw_total(),
        style(format!("(reading ease {:.2})", terms.reading_ease)).dim()
    );
}

pub fn readability(text: &str) -> Result<()> {
    let words = readability::words(text);
    let syllables: usize = words.iter().map(|w| readability::syllables(w)).sum();
    println!("{:.2}", readability::estimate(text));
    println!(
        "  {}",
        style(format!(
            "{} words, {} sentences, {} syllables",
            words.len(),
            readability::sentences(text).len(),
            syllables
        ))
        .dim()
    );
    Ok(())
}

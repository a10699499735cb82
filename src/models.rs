//! Core data models for aiq
//!
//! These models are shared by the scoring core and the collaborators
//! around it (extractors, the scan orchestrator, reporters).

use serde::{Deserialize, Serialize};

/// Normalized signals for one feed item.
///
/// Built fresh by a [`SignalExtractor`](crate::extract::SignalExtractor) on
/// every scan pass and never mutated afterwards. Fields the extractor could
/// not locate stay at their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Whether a category/flair tag is attached
    #[serde(default)]
    pub tag_present: bool,
    #[serde(default)]
    pub external_link_count: u32,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub approval_count: u64,
    /// Raw author handle, possibly carrying a `u/` prefix
    #[serde(default)]
    pub author_handle: String,
}

impl Record {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_tag(mut self, present: bool) -> Self {
        self.tag_present = present;
        self
    }

    pub fn with_links(mut self, count: u32) -> Self {
        self.external_link_count = count;
        self
    }

    pub fn with_replies(mut self, count: u64) -> Self {
        self.reply_count = count;
        self
    }

    pub fn with_approvals(mut self, count: u64) -> Self {
        self.approval_count = count;
        self
    }

    pub fn with_author(mut self, handle: impl Into<String>) -> Self {
        self.author_handle = handle.into();
        self
    }
}

/// Visibility outcome for a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    #[default]
    Visible,
    Dimmed,
    Suppressed,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Visible => write!(f, "visible"),
            Decision::Dimmed => write!(f, "dimmed"),
            Decision::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// What kind of feed entry an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Post,
    /// A comment under a post
    Reply,
}

/// Per-item result handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub item_id: String,
    pub kind: ItemKind,
    pub score: u8,
    /// Outcome of the visibility policy
    pub decision: Decision,
    /// Outcome after the focus guard; this is what gets applied
    pub applied: Decision,
    pub is_own: bool,
    pub badge: String,
}

impl Verdict {
    /// Badge text shown next to the title
    pub fn badge_text(score: u8, is_own: bool) -> String {
        if is_own {
            format!("AIQ {} (yours)", score)
        } else {
            format!("AIQ {}", score)
        }
    }
}

/// Tally of applied decisions for one scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub visible: usize,
    pub dimmed: usize,
    pub suppressed: usize,
    pub own: usize,
    pub total: usize,
}

impl DecisionSummary {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut summary = Self::default();
        for v in verdicts {
            match v.applied {
                Decision::Visible => summary.visible += 1,
                Decision::Dimmed => summary.dimmed += 1,
                Decision::Suppressed => summary.suppressed += 1,
            }
            if v.is_own {
                summary.own += 1;
            }
            summary.total += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(Verdict::badge_text(72, false), "AIQ 72");
        assert_eq!(Verdict::badge_text(12, true), "AIQ 12 (yours)");
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: Record = serde_json::from_str(r#"{"title": "hello"}"#).unwrap();
        assert_eq!(record.title, "hello");
        assert_eq!(record.body, "");
        assert!(!record.tag_present);
        assert_eq!(record.external_link_count, 0);
        assert_eq!(record.author_handle, "");
    }

    #[test]
    fn test_summary_counts_applied_decisions() {
        let mk = |applied, is_own| Verdict {
            item_id: "x".into(),
            kind: ItemKind::Post,
            score: 50,
            decision: Decision::Suppressed,
            applied,
            is_own,
            badge: String::new(),
        };
        let summary = DecisionSummary::from_verdicts(&[
            mk(Decision::Visible, true),
            mk(Decision::Suppressed, false),
            mk(Decision::Dimmed, false),
        ]);
        assert_eq!(summary.visible, 1);
        assert_eq!(summary.suppressed, 1);
        assert_eq!(summary.dimmed, 1);
        assert_eq!(summary.own, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::Dimmed.to_string(), "dimmed");
        assert_eq!(
            serde_json::to_string(&Decision::Suppressed).unwrap(),
            "\"suppressed\""
        );
    }
}

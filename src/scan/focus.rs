//! Focus guard for permalink views
//!
//! On a single-item view the focused item is still scored and badged, but a
//! dim/hide decision is never applied to it. Replies are protected only when
//! `guard_focused_replies` is set.

use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

use crate::config::FilterConfig;
use crate::models::{Decision, ItemKind};

static PERMALINK: OnceLock<Regex> = OnceLock::new();

fn permalink_regex() -> &'static Regex {
    PERMALINK.get_or_init(|| {
        // /comments/<post>[/<slug>[/<reply>]]
        Regex::new(r"/comments/([A-Za-z0-9]+)(?:/[^/?#]*(?:/([A-Za-z0-9]+))?)?").unwrap()
    })
}

/// Which items the current view is focused on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    focused: FxHashSet<String>,
}

impl ViewContext {
    /// A feed/listing view: nothing is focused
    pub fn feed() -> Self {
        Self::default()
    }

    pub fn focused_on<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            focused: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Derive focused ids from a permalink URL (`t3_` post, `t1_` reply)
    pub fn from_url(url: &str) -> Self {
        let Some(caps) = permalink_regex().captures(url) else {
            return Self::feed();
        };
        let mut focused = FxHashSet::default();
        if let Some(post) = caps.get(1) {
            focused.insert(format!("t3_{}", post.as_str()));
        }
        if let Some(reply) = caps.get(2) {
            focused.insert(format!("t1_{}", reply.as_str()));
        }
        Self { focused }
    }

    /// Router-supplied ids win over URL parsing
    pub fn resolve(url: &str, explicit: &[String]) -> Self {
        if explicit.is_empty() {
            Self::from_url(url)
        } else {
            Self::focused_on(explicit.iter().cloned())
        }
    }

    pub fn is_permalink(&self) -> bool {
        !self.focused.is_empty()
    }

    pub fn is_focused(&self, item_id: &str) -> bool {
        self.focused.contains(item_id)
    }

    /// Decision to actually apply to an item
    pub fn guard(
        &self,
        item_id: &str,
        kind: ItemKind,
        decision: Decision,
        config: &FilterConfig,
    ) -> Decision {
        let protected = self.is_focused(item_id)
            && (kind == ItemKind::Post || config.guard_focused_replies);
        if protected {
            Decision::Visible
        } else {
            decision
        }
    }
}

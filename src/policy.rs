//! Visibility policy
//!
//! Pure decision over one configuration snapshot. Own items are always
//! visible; everything else is visible unless the filter is enabled and the
//! item is "low" (below threshold, or untagged while tags are required).

use crate::config::FilterConfig;
use crate::models::Decision;

/// Whether an item falls below the configured bar
pub fn is_low(score: u8, tag_present: bool, config: &FilterConfig) -> bool {
    i64::from(score) < config.effective_threshold() || (config.require_tag && !tag_present)
}

/// Decide how an item should be displayed
pub fn decide(score: u8, is_own: bool, tag_present: bool, config: &FilterConfig) -> Decision {
    if is_own {
        return Decision::Visible;
    }
    let low = is_low(score, tag_present, config);
    if !config.enabled || !low {
        Decision::Visible
    } else if config.dim_instead_of_hide {
        Decision::Dimmed
    } else {
        Decision::Suppressed
    }
}

//! Decides whether an item was written by the viewer

use serde::{Deserialize, Serialize};

/// Lower-case a handle and drop a leading `u/` prefix
pub fn normalize_handle(handle: &str) -> String {
    let lower = handle.to_lowercase();
    match lower.strip_prefix("u/") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// True when `author` matches the detected or the manually configured viewer.
///
/// An empty author never matches. An empty manual handle is ignored.
pub fn is_own(author: &str, detected: Option<&str>, manual: &str) -> bool {
    let author = normalize_handle(author);
    if author.is_empty() {
        return false;
    }
    let detected = normalize_handle(detected.unwrap_or_default());
    let manual = normalize_handle(manual);

    author == detected || (!manual.is_empty() && author == manual)
}

/// Who is looking at the feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerIdentity {
    /// Handle found in the page chrome, if any
    pub detected: Option<String>,
    /// Handle set in the settings; empty when unset
    #[serde(default)]
    pub manual: String,
}

impl ViewerIdentity {
    pub fn new(detected: Option<String>, manual: impl Into<String>) -> Self {
        Self {
            detected,
            manual: manual.into(),
        }
    }

    pub fn owns(&self, author: &str) -> bool {
        is_own(author, self.detected.as_deref(), &self.manual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_handle() {
        assert_eq!(normalize_handle("u/Alice"), "alice");
        assert_eq!(normalize_handle("U/Alice"), "alice");
        assert_eq!(normalize_handle("Bob"), "bob");
        assert_eq!(normalize_handle(""), "");
        assert_eq!(normalize_handle("/u/x"), "/u/x");
    }

    #[test]
    fn test_prefixed_author_matches_detected() {
        assert!(is_own("u/Alice", Some("alice"), ""));
    }

    #[test]
    fn test_manual_handle_matches() {
        assert!(is_own("Bob", Some("alice"), "bob"));
        assert!(is_own("bob", None, "u/BOB"));
    }

    #[test]
    fn test_empty_author_never_owns() {
        assert!(!is_own("", Some("alice"), ""));
        assert!(!is_own("", None, ""));
        assert!(!is_own("u/", Some(""), ""));
    }

    #[test]
    fn test_exact_match_only() {
        assert!(!is_own("alice2", Some("alice"), ""));
        assert!(!is_own("ali", Some("alice"), "al"));
    }

    #[test]
    fn test_detected_handle_with_prefix() {
        assert!(is_own("carol", Some("u/Carol"), ""));
    }

    #[test]
    fn test_viewer_identity() {
        let viewer = ViewerIdentity::new(Some("alice".into()), "");
        assert!(viewer.owns("u/ALICE"));
        assert!(!viewer.owns("bob"));
        assert!(!ViewerIdentity::default().owns("bob"));
    }
}

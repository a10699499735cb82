//! Finds the signed-in handle in the page chrome

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

use super::dom::{fragment, text_of};

static CANDIDATES: OnceLock<Vec<Selector>> = OnceLock::new();
static USER_HREF: OnceLock<Regex> = OnceLock::new();
static USER_PREFIXED: OnceLock<Regex> = OnceLock::new();
static BARE_WORD: OnceLock<Regex> = OnceLock::new();

fn candidates() -> &'static [Selector] {
    CANDIDATES.get_or_init(|| {
        [
            r#"header a[href^="/user/"]"#,
            r#"a[data-click-id="user"]"#,
            r#"button[aria-label*="profile"]"#,
            r#"span.user a[href*="/user/"]"#,
            "#header-bottom-right .user a",
        ]
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
    })
}

fn user_href_regex() -> &'static Regex {
    USER_HREF.get_or_init(|| Regex::new(r"(?i)/user/([^/?#]+)").unwrap())
}

fn user_prefixed_regex() -> &'static Regex {
    USER_PREFIXED.get_or_init(|| Regex::new(r"u/([A-Za-z0-9_-]+)").unwrap())
}

fn bare_word_regex() -> &'static Regex {
    BARE_WORD.get_or_init(|| Regex::new(r"\b([A-Za-z0-9_-]{2,})\b").unwrap())
}

/// Handle carried by one candidate element
fn handle_from(element: ElementRef<'_>) -> Option<String> {
    let href = element.value().attr("href").unwrap_or_default();
    if let Some(m) = user_href_regex().captures(href).and_then(|c| c.get(1)) {
        return Some(m.as_str().to_string());
    }
    let text = text_of(element);
    user_prefixed_regex()
        .captures(&text)
        .or_else(|| bare_word_regex().captures(&text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Signed-in handle, if the page chrome (an HTML fragment) shows one
pub fn detect_viewer(chrome: &str) -> Option<String> {
    if chrome.trim().is_empty() {
        return None;
    }
    let doc = fragment(chrome);
    candidates()
        .iter()
        .filter_map(|sel| doc.select(sel).next())
        .find_map(handle_from)
}

//! Helpers over captured HTML fragments
//!
//! Items, shadow roots and page chrome arrive as HTML strings and are parsed
//! with `scraper`. The helpers below read text, counts and links through
//! selector fallback chains.

use scraper::{ElementRef, Html, Selector};

/// Parse a captured HTML fragment
pub fn fragment(html: &str) -> Html {
    Html::parse_fragment(html)
}

/// Concatenated text of an element and its descendants
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Trimmed text of the first element matched by any selector, in order
pub fn first_text(doc: &Html, chain: &[&Selector]) -> Option<String> {
    chain
        .iter()
        .find_map(|sel| doc.select(sel).next())
        .map(|el| text_of(el).trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Digits of the first matching element's text, or 0
pub fn numeric(doc: &Html, selector: &Selector) -> u64 {
    let text = doc.select(selector).next().map(text_of).unwrap_or_default();
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// Anchors pointing off-site
pub fn external_link_count(doc: &Html, anchors: &Selector) -> u32 {
    let count = doc.select(anchors).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        Selector::parse(s).unwrap()
    }

    fn doc() -> Html {
        fragment(
            r#"<div data-click-id="body">
                 <h3>Nested title</h3>
                 <span class="user meta"><a href="/user/alice/">alice</a></span>
                 <button aria-label="upvote"></button>
                 <div>1.2k</div>
               </div>"#,
        )
    }

    #[test]
    fn test_numeric_reads_digits_only() {
        let doc = doc();
        assert_eq!(numeric(&doc, &sel(r#"[aria-label] + div"#)), 12);
        assert_eq!(numeric(&doc, &sel("h3")), 0);
        assert_eq!(numeric(&doc, &sel("table")), 0);
    }

    #[test]
    fn test_numeric_saturates() {
        let doc = fragment("<span>99999999999999999999999 votes</span>");
        assert_eq!(numeric(&doc, &sel("span")), u64::MAX);
    }

    #[test]
    fn test_first_text_falls_back() {
        let doc = doc();
        let missing = sel("h1");
        let present = sel("h3");
        assert_eq!(
            first_text(&doc, &[&missing, &present]).as_deref(),
            Some("Nested title")
        );
        assert_eq!(first_text(&doc, &[&missing]), None);
    }

    #[test]
    fn test_blank_match_is_none() {
        let doc = fragment("<span data-testid=\"post-tag\">   </span>");
        assert_eq!(first_text(&doc, &[&sel("[data-testid=\"post-tag\"]")]), None);
    }

    #[test]
    fn test_comma_inside_attribute_value() {
        let doc = fragment(r#"<a title="x,y">quoted</a><a title="x">plain</a>"#);
        let quoted = sel(r#"a[title="x,y"]"#);
        assert_eq!(first_text(&doc, &[&quoted]).as_deref(), Some("quoted"));
    }

    #[test]
    fn test_external_link_count() {
        let doc = fragment(
            r#"<a href="https://arxiv.org/abs/1">a</a>
               <a href="http://example.com">b</a>
               <a href="/r/local">c</a>"#,
        );
        assert_eq!(external_link_count(&doc, &sel(r#"a[href^="http"]"#)), 2);
    }
}

//! Classic layout: fields are plain descendants of the item

use scraper::Selector;
use std::sync::OnceLock;

use super::dom::{external_link_count, first_text, fragment, numeric};
use super::{ItemNode, Layout, SignalExtractor};
use crate::models::Record;

struct ClassicSelectors {
    title: [Selector; 4],
    body: [Selector; 3],
    tag: Selector,
    author: [Selector; 3],
    replies: Selector,
    approvals: Selector,
    links: Selector,
}

static SELECTORS: OnceLock<ClassicSelectors> = OnceLock::new();

fn selectors() -> &'static ClassicSelectors {
    SELECTORS.get_or_init(|| {
        let s = |css: &str| Selector::parse(css).unwrap();
        ClassicSelectors {
            title: [
                s(r#"h3[data-testid="post-title"]"#),
                s(r#"[data-click-id="body"] h3"#),
                s("a.title"),
                s("h1, h2, h3"),
            ],
            body: [
                s(r#"[data-click-id="text"]"#),
                s(r#"div[data-test="post-content"]"#),
                s("p"),
            ],
            tag: s(r#"[data-testid="post-tag"], [data-testid="post-flair"]"#),
            author: [
                s(r#"a[href^="/user/"]"#),
                s("a.author"),
                s(r#"[data-testid="post-author-name"]"#),
            ],
            replies: s(r#"[data-click-id="comments"], a[data-click-id="comments"]"#),
            approvals: s(r#"[aria-label*="upvote"] + div, [id*="vote"] + div"#),
            links: s(r#"a[href^="http"]"#),
        }
    })
}

/// Extractor for the classic (light DOM) layout
#[derive(Debug, Default)]
pub struct ClassicExtractor;

impl ClassicExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SignalExtractor for ClassicExtractor {
    fn name(&self) -> &'static str {
        "ClassicExtractor"
    }

    fn layout(&self) -> Layout {
        Layout::Classic
    }

    fn extract(&self, item: &ItemNode) -> Option<Record> {
        let sel = selectors();
        let doc = fragment(&item.html);
        let chain = |list: &'static [Selector]| list.iter().collect::<Vec<_>>();

        Some(Record {
            title: first_text(&doc, &chain(&sel.title)).unwrap_or_default(),
            body: first_text(&doc, &chain(&sel.body)).unwrap_or_default(),
            tag_present: first_text(&doc, &[&sel.tag]).is_some(),
            external_link_count: external_link_count(&doc, &sel.links),
            reply_count: numeric(&doc, &sel.replies),
            approval_count: numeric(&doc, &sel.approvals),
            author_handle: first_text(&doc, &chain(&sel.author)).unwrap_or_default(),
        })
    }
}

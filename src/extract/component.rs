//! Component layout: fields live in the item's shadow root
//!
//! Reply and approval counts are not reachable from the shadow root and are
//! always zero. Host attributes fill in a missing title, author or tag.

use scraper::Selector;
use std::sync::OnceLock;

use super::dom::{external_link_count, first_text, fragment};
use super::{ItemNode, Layout, SignalExtractor};
use crate::models::Record;

struct ComponentSelectors {
    title: [Selector; 2],
    body: [Selector; 2],
    author: [Selector; 2],
    tag: Selector,
    links: Selector,
}

static SELECTORS: OnceLock<ComponentSelectors> = OnceLock::new();

fn selectors() -> &'static ComponentSelectors {
    SELECTORS.get_or_init(|| {
        let s = |css: &str| Selector::parse(css).unwrap();
        ComponentSelectors {
            title: [
                s(r#"h3, h2, h1, a[slot="title"]"#),
                s(r#"[data-testid="post-title"]"#),
            ],
            body: [s(r#"[data-test="post-content"], [slot="text"]"#), s("p")],
            author: [s(r#"a[href^="/user/"]"#), s(r#"a[slot="author"]"#)],
            tag: s(r#"[data-testid="post-tag"], [data-testid="post-flair"]"#),
            links: s(r#"a[href^="http"]"#),
        }
    })
}

/// Extractor for shadow-root components
#[derive(Debug, Default)]
pub struct ComponentExtractor;

impl ComponentExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl SignalExtractor for ComponentExtractor {
    fn name(&self) -> &'static str {
        "ComponentExtractor"
    }

    fn layout(&self) -> Layout {
        Layout::Component
    }

    fn extract(&self, item: &ItemNode) -> Option<Record> {
        let shadow = fragment(item.shadow.as_deref()?);
        let sel = selectors();
        let chain = |list: &'static [Selector]| list.iter().collect::<Vec<_>>();
        let host = |name: &str| item.host_attr(name).map(str::to_string);

        let title = first_text(&shadow, &chain(&sel.title)).or_else(|| host("data-title"));
        let author = first_text(&shadow, &chain(&sel.author)).or_else(|| host("author"));
        let tag = first_text(&shadow, &[&sel.tag]).or_else(|| host("linkflairtext"));

        Some(Record {
            title: title.unwrap_or_default(),
            body: first_text(&shadow, &chain(&sel.body)).unwrap_or_default(),
            tag_present: tag.is_some(),
            external_link_count: external_link_count(&shadow, &sel.links),
            reply_count: 0,
            approval_count: 0,
            author_handle: author.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(shadow: Option<&str>) -> ItemNode {
        ItemNode {
            id: "t3_c".into(),
            layout: Layout::Component,
            shadow: shadow.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_without_shadow_root_is_unreadable() {
        assert!(ComponentExtractor::new().extract(&component(None)).is_none());
    }

    #[test]
    fn test_reads_shadow_root() {
        let node = component(Some(
            r#"<a slot="title">Fine-tuning with LoRA</a>
               <div slot="text">Why it works: <a href="https://example.com">paper</a></div>
               <a slot="author">carol</a>"#,
        ));

        let record = ComponentExtractor::new().extract(&node).unwrap();
        assert_eq!(record.title, "Fine-tuning with LoRA");
        assert_eq!(record.body, "Why it works: paper");
        assert_eq!(record.author_handle, "carol");
        assert_eq!(record.external_link_count, 1);
        assert!(!record.tag_present);
        assert_eq!(record.reply_count, 0);
        assert_eq!(record.approval_count, 0);
    }

    #[test]
    fn test_falls_back_to_host_attributes() {
        let mut node = component(Some(""));
        node.attrs.insert("data-title".into(), "Host title".into());
        node.attrs.insert("author".into(), "dave".into());
        node.attrs.insert("linkflairtext".into(), "Discussion".into());

        let record = ComponentExtractor::new().extract(&node).unwrap();
        assert_eq!(record.title, "Host title");
        assert_eq!(record.author_handle, "dave");
        assert!(record.tag_present);
        assert_eq!(record.body, "");
    }
}

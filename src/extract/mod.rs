//! Signal extraction from rendered feed items
//!
//! Items arrive as captured HTML fragments. Feeds come in two rendering
//! technologies:
//! - the classic layout, where item fields are plain descendants
//! - the component layout, where fields sit inside a shadow root and are
//!   partly mirrored as host attributes
//!
//! Both are handled behind [`SignalExtractor`], which turns an item into a
//! [`Record`] with every unavailable field left at its zero value. Nothing in
//! the scoring core knows which layout an item came from.

mod classic;
mod component;
pub mod dom;
mod viewer;

pub use classic::ClassicExtractor;
pub use component::ComponentExtractor;
pub use viewer::detect_viewer;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::models::{ItemKind, Record};

/// Rendering technology of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Classic,
    Component,
}

/// One rendered feed item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNode {
    /// Stable identifier (e.g. `t3_abc123` for posts, `t1_def456` for replies)
    pub id: String,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub kind: ItemKind,
    /// Attributes of the item's host element
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner HTML of the item
    #[serde(default)]
    pub html: String,
    /// Shadow root HTML; `None` until the component has rendered
    #[serde(default)]
    pub shadow: Option<String>,
}

impl ItemNode {
    pub fn host_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// A captured page: chrome plus the feed items currently rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    /// Page chrome HTML (header, user menu) used for viewer detection
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub items: Vec<ItemNode>,
    /// Item ids the router reports as focused; overrides URL parsing
    #[serde(default)]
    pub focused: Vec<String>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a page snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<PageSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Turns a rendered item into scoring input
///
/// Implementations must never fail loudly: a field that cannot be located
/// is left empty or zero. `None` means the item is not readable yet.
pub trait SignalExtractor: Send + Sync {
    /// Extractor name (for logging)
    fn name(&self) -> &'static str;

    /// Layout this extractor understands
    fn layout(&self) -> Layout;

    fn extract(&self, item: &ItemNode) -> Option<Record>;
}

/// One extractor per supported layout
pub fn default_extractors() -> Vec<Box<dyn SignalExtractor>> {
    vec![
        Box::new(ClassicExtractor::new()),
        Box::new(ComponentExtractor::new()),
    ]
}

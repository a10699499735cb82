//! Scan orchestration
//!
//! Applies extraction, scoring, ownership and the visibility policy to every
//! item of a page snapshot that has not been processed yet.
//!
//! # Idempotency
//!
//! Processed item ids are recorded with the generation they were scored in.
//! Repeated scans of the same page only pick up new items. A settings change
//! (store version bump) opens a new generation, so every item is scored again
//! exactly once under the new settings.
//!
//! Items whose extractor cannot read them yet (e.g. a component that has not
//! rendered its shadow root) are not recorded and are retried next pass.

pub mod batch;
mod focus;

pub use batch::{next_batch, DEFAULT_BATCH_WINDOW};
pub use focus::ViewContext;

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::{FilterConfig, SettingsStore};
use crate::extract::{default_extractors, detect_viewer, ItemNode, PageSnapshot, SignalExtractor};
use crate::models::{DecisionSummary, ItemKind, Record, Verdict};
use crate::ownership::ViewerIdentity;
use crate::policy::decide;
use crate::scoring::score;

/// Minimum time between two viewer detections
pub const DEFAULT_DETECT_INTERVAL: Duration = Duration::from_secs(2);

/// Score, ownership and decision for one record. Pure.
pub fn evaluate(
    item_id: &str,
    kind: ItemKind,
    record: &Record,
    config: &FilterConfig,
    viewer: &ViewerIdentity,
    view: &ViewContext,
) -> Verdict {
    let score = score(record, config.min_title_chars);
    let is_own = viewer.owns(&record.author_handle);
    let decision = decide(score, is_own, record.tag_present, config);
    let applied = view.guard(item_id, kind, decision, config);

    Verdict {
        item_id: item_id.to_string(),
        kind,
        score,
        decision,
        applied,
        is_own,
        badge: Verdict::badge_text(score, is_own),
    }
}

/// Result of one scan pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub generation: u64,
    pub viewer: Option<String>,
    /// Verdicts for items processed in this pass
    pub verdicts: Vec<Verdict>,
    pub summary: DecisionSummary,
    /// Items already processed in this generation
    pub skipped: usize,
    /// Items no extractor could read yet
    pub unreadable: usize,
}

/// Stateful driver that re-applies the pipeline to newly observed items
pub struct Scanner {
    store: Arc<SettingsStore>,
    extractors: Vec<Box<dyn SignalExtractor>>,
    detected_viewer: Option<String>,
    last_detect: Option<Instant>,
    detect_interval: Duration,
    processed: FxHashMap<String, u64>,
    generation: u64,
    settings_version: Option<u64>,
}

impl Scanner {
    pub fn new(store: Arc<SettingsStore>) -> Self {
        Self {
            store,
            extractors: default_extractors(),
            detected_viewer: None,
            last_detect: None,
            detect_interval: DEFAULT_DETECT_INTERVAL,
            processed: FxHashMap::default(),
            generation: 0,
            settings_version: None,
        }
    }

    pub fn with_detect_interval(mut self, interval: Duration) -> Self {
        self.detect_interval = interval;
        self
    }

    /// Seed the viewer handle (e.g. one remembered from an earlier session)
    pub fn with_viewer(mut self, handle: impl Into<String>) -> Self {
        self.detected_viewer = Some(handle.into());
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn viewer(&self) -> Option<&str> {
        self.detected_viewer.as_deref()
    }

    /// Forget what has been processed; the next scan re-scores everything
    pub fn invalidate(&mut self) {
        self.processed.clear();
        self.generation += 1;
        debug!("Scan generation {}", self.generation);
    }

    fn extractor_for(&self, item: &ItemNode) -> Option<&dyn SignalExtractor> {
        self.extractors
            .iter()
            .find(|e| e.layout() == item.layout)
            .map(|e| &**e)
    }

    /// Re-detect the viewer unless the last detection was too recent
    fn refresh_viewer(&mut self, page: &PageSnapshot, now: Instant, verbose: bool) {
        if let Some(last) = self.last_detect {
            if now.duration_since(last) < self.detect_interval {
                return;
            }
        }
        self.last_detect = Some(now);

        if let Some(handle) = detect_viewer(&page.header) {
            if self.detected_viewer.as_deref() != Some(handle.as_str()) {
                if verbose {
                    info!("Detected viewer: {}", handle);
                } else {
                    debug!("Detected viewer: {}", handle);
                }
                self.detected_viewer = Some(handle);
            }
        }
    }

    /// Process every item of `page` not yet scored in this generation
    pub fn scan(&mut self, page: &PageSnapshot) -> ScanReport {
        // One snapshot for the whole pass
        let (config, version) = self.store.snapshot_with_version();
        if let Some(seen) = self.settings_version {
            if seen != version {
                self.invalidate();
            }
        }
        self.settings_version = Some(version);

        self.refresh_viewer(page, Instant::now(), config.debug);
        let viewer = ViewerIdentity::new(
            self.detected_viewer.clone(),
            config.manual_viewer_handle.clone(),
        );
        let view = ViewContext::resolve(&page.url, &page.focused);
        if view.is_permalink() {
            debug!("Permalink view, focus guard active");
        }

        let mut verdicts = Vec::new();
        let mut skipped = 0;
        let mut unreadable = 0;

        for item in &page.items {
            if self.processed.get(&item.id) == Some(&self.generation) {
                skipped += 1;
                continue;
            }
            let Some(extractor) = self.extractor_for(item) else {
                unreadable += 1;
                continue;
            };
            let Some(record) = extractor.extract(item) else {
                debug!("{} cannot read {} yet", extractor.name(), item.id);
                unreadable += 1;
                continue;
            };
            self.processed.insert(item.id.clone(), self.generation);
            verdicts.push(evaluate(&item.id, item.kind, &record, &config, &viewer, &view));
        }

        let summary = DecisionSummary::from_verdicts(&verdicts);
        if config.debug {
            info!(
                "Scanned {} items (new={}, skipped={}, unreadable={}, viewer={})",
                page.items.len(),
                verdicts.len(),
                skipped,
                unreadable,
                self.detected_viewer.as_deref().unwrap_or("?")
            );
        } else {
            debug!(
                "Scanned {} items (new={}, skipped={}, unreadable={})",
                page.items.len(),
                verdicts.len(),
                skipped,
                unreadable
            );
        }

        ScanReport {
            generation: self.generation,
            viewer: self.detected_viewer.clone(),
            verdicts,
            summary,
            skipped,
            unreadable,
        }
    }
}

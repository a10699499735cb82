//! Library-level scan tests over a captured page snapshot

use std::path::PathBuf;
use std::sync::Arc;

use aiq::config::{load_or_default, FilterConfig, SettingsStore};
use aiq::extract::{load_snapshot, PageSnapshot};
use aiq::models::{Decision, ItemKind, Verdict};
use aiq::scan::{ScanReport, Scanner};
use serde_json::json;

fn fixture() -> PageSnapshot {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/feed.json");
    load_snapshot(&path).unwrap()
}

fn verdict<'a>(report: &'a ScanReport, id: &str) -> &'a Verdict {
    report
        .verdicts
        .iter()
        .find(|v| v.item_id == id)
        .unwrap_or_else(|| panic!("no verdict for {id}"))
}

fn changes(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn test_full_scan_of_feed() {
    let mut scanner = Scanner::new(Arc::new(SettingsStore::default()));
    let report = scanner.scan(&fixture());

    assert_eq!(report.viewer.as_deref(), Some("alice"));
    assert_eq!(report.verdicts.len(), 4);
    assert_eq!(report.unreadable, 1);

    let good = verdict(&report, "t3_good");
    assert_eq!(good.score, 69);
    assert_eq!(good.applied, Decision::Visible);
    assert_eq!(good.badge, "AIQ 69");

    assert_eq!(verdict(&report, "t3_low").applied, Decision::Suppressed);

    let mine = verdict(&report, "t3_mine");
    assert!(mine.is_own);
    assert_eq!(mine.applied, Decision::Visible);
    assert!(mine.badge.ends_with("(yours)"));

    let reply = verdict(&report, "t1_reply");
    assert_eq!(reply.kind, ItemKind::Reply);
    assert_eq!(reply.applied, Decision::Suppressed);

    assert_eq!(report.summary.visible, 2);
    assert_eq!(report.summary.suppressed, 2);
    assert_eq!(report.summary.own, 1);
}

#[test]
fn test_rescan_only_reports_new_items() {
    let mut scanner = Scanner::new(Arc::new(SettingsStore::default()));
    let page = fixture();
    scanner.scan(&page);

    let report = scanner.scan(&page);
    assert!(report.verdicts.is_empty());
    assert_eq!(report.skipped, 4);
    // still waiting for its shadow root
    assert_eq!(report.unreadable, 1);
}

#[test]
fn test_settings_change_rescores_everything_once() {
    let store = Arc::new(SettingsStore::default());
    let updates = store.subscribe();
    let mut scanner = Scanner::new(Arc::clone(&store));
    let page = fixture();
    scanner.scan(&page);

    store.apply_changes(&changes(json!({ "dimInsteadOfHide": true })));
    assert!(updates.try_recv().unwrap().dim_instead_of_hide);

    let report = scanner.scan(&page);
    assert_eq!(report.generation, 1);
    assert_eq!(report.verdicts.len(), 4);
    assert_eq!(verdict(&report, "t3_low").applied, Decision::Dimmed);
    assert_eq!(report.summary.dimmed, 2);

    assert!(scanner.scan(&page).verdicts.is_empty());
}

#[test]
fn test_unchanged_settings_keep_generation() {
    let store = Arc::new(SettingsStore::default());
    let mut scanner = Scanner::new(Arc::clone(&store));
    let page = fixture();
    scanner.scan(&page);

    store.apply_changes(&changes(json!({ "threshold": 60, "bogus": 1 })));
    let report = scanner.scan(&page);
    assert_eq!(report.generation, 0);
    assert!(report.verdicts.is_empty());
}

#[test]
fn test_kill_switch_shows_everything() {
    let store = Arc::new(SettingsStore::new(FilterConfig {
        enabled: false,
        ..Default::default()
    }));
    let report = Scanner::new(store).scan(&fixture());
    assert!(report.verdicts.iter().all(|v| v.applied == Decision::Visible));
    // scores and badges are still computed
    assert_eq!(verdict(&report, "t3_good").score, 69);
}

#[test]
fn test_permalink_view_keeps_focused_post() {
    let mut page = fixture();
    page.url = "https://www.reddit.com/r/MachineLearning/comments/low/shocking_trick/".into();
    let report = Scanner::new(Arc::new(SettingsStore::default())).scan(&page);

    let low = verdict(&report, "t3_low");
    assert_eq!(low.decision, Decision::Suppressed);
    assert_eq!(low.applied, Decision::Visible);
}

#[test]
fn test_threshold_from_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "threshold = 80\nrequireSubFlair = true\n").unwrap();

    let config = load_or_default(Some(&path));
    assert_eq!(config.threshold, 80);
    assert!(config.require_tag);

    let report = Scanner::new(Arc::new(SettingsStore::new(config))).scan(&fixture());
    assert_eq!(verdict(&report, "t3_good").applied, Decision::Suppressed);
    assert_eq!(verdict(&report, "t3_mine").applied, Decision::Visible);
}

#[test]
fn test_broken_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "threshold = [not toml").unwrap();
    assert_eq!(load_or_default(Some(&path)), FilterConfig::default());
}

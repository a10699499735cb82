//! `aiq scan` - one pass over a page snapshot

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use aiq::config::SettingsStore;
use aiq::extract::load_snapshot;
use aiq::reporters;
use aiq::scan::Scanner;

/// Scanner over the current settings, optionally seeded with a viewer
pub(crate) fn scanner(store: Arc<SettingsStore>, viewer: Option<String>) -> Scanner {
    let scanner = Scanner::new(store);
    match viewer {
        Some(handle) => scanner.with_viewer(handle),
        None => scanner,
    }
}

pub fn run(
    settings: Option<&Path>,
    snapshot: &Path,
    format: &str,
    viewer: Option<String>,
) -> Result<()> {
    let page = load_snapshot(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
    let store = Arc::new(SettingsStore::new(super::config::load(settings)));

    let report = scanner(store, viewer).scan(&page);
    let output = reporters::report(&report, format)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

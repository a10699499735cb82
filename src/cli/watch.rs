//! `aiq watch` - live re-scan on snapshot or settings changes
//!
//! Watches the page snapshot and the settings file. Bursts of file events are
//! coalesced into one batch; every batch re-reads what changed and runs one
//! scan pass. Only items not yet scored in the current generation are printed.

use anyhow::{Context, Result};
use console::style;
use crossbeam_channel::{unbounded, Sender};
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use aiq::config::{load_or_default, SettingsStore};
use aiq::extract::load_snapshot;
use aiq::reporters::render_verdict_line;
use aiq::scan::{next_batch, ScanReport, Scanner, DEFAULT_BATCH_WINDOW};

/// What a file event touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchEvent {
    SnapshotChanged,
    SettingsChanged,
}

/// Absolute path for a file that may not exist yet
fn absolute(path: &Path) -> Result<PathBuf> {
    if let Ok(p) = std::fs::canonicalize(path) {
        return Ok(p);
    }
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::canonicalize(parent)
            .with_context(|| format!("Directory does not exist: {}", parent.display()))?,
        None => std::env::current_dir()?,
    };
    let name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?;
    Ok(parent.join(name))
}

/// Map the paths of a debounced batch onto watch events
fn classify(paths: &[PathBuf], snapshot: &Path, settings: Option<&Path>) -> Vec<WatchEvent> {
    let mut events = Vec::new();
    for path in paths {
        if path == snapshot {
            events.push(WatchEvent::SnapshotChanged);
        } else if Some(path.as_path()) == settings {
            events.push(WatchEvent::SettingsChanged);
        }
    }
    events
}

fn forward(
    tx: &Sender<WatchEvent>,
    snapshot: &Path,
    settings: Option<&Path>,
    result: DebounceEventResult,
) {
    match result {
        Ok(events) => {
            for event in events {
                for e in classify(&event.paths, snapshot, settings) {
                    let _ = tx.send(e);
                }
            }
        }
        Err(errors) => {
            for e in errors {
                warn!("Watch error: {}", e);
            }
        }
    }
}

pub fn run(settings: Option<&Path>, snapshot: &Path, viewer: Option<String>) -> Result<()> {
    let snapshot_path = std::fs::canonicalize(snapshot)
        .with_context(|| format!("Snapshot does not exist: {}", snapshot.display()))?;
    let settings_path = super::config::settings_path(settings)
        .map(|p| absolute(&p))
        .transpose()?;

    println!(
        "\n{}Watching {} for changes...\n",
        style("👁️  ").bold(),
        style(snapshot_path.display()).cyan()
    );
    if let Some(path) = &settings_path {
        println!("  {} Settings: {}", style("→").dim(), style(path.display()).dim());
    }
    println!("  {} Press Ctrl+C to stop\n", style("→").dim());

    let store = Arc::new(SettingsStore::new(load_or_default(settings_path.as_deref())));
    let mut scanner = super::scan::scanner(Arc::clone(&store), viewer);

    let (tx, rx) = unbounded();
    let mut debouncer = {
        let snapshot_path = snapshot_path.clone();
        let settings_path = settings_path.clone();
        new_debouncer(
            Duration::from_millis(100),
            None,
            move |result: DebounceEventResult| {
                forward(&tx, &snapshot_path, settings_path.as_deref(), result)
            },
        )?
    };

    let mut watched: Vec<&Path> = Vec::new();
    for dir in [snapshot_path.parent(), settings_path.as_deref().and_then(Path::parent)]
        .into_iter()
        .flatten()
    {
        if watched.contains(&dir) || !dir.is_dir() {
            continue;
        }
        debouncer.watch(dir, RecursiveMode::NonRecursive)?;
        debug!("Watching {}", dir.display());
        watched.push(dir);
    }

    // Initial pass
    rescan(&mut scanner, &snapshot_path);

    let mut total = 0usize;
    while let Some(batch) = next_batch(&rx, DEFAULT_BATCH_WINDOW) {
        if batch.contains(&WatchEvent::SettingsChanged) {
            let next = load_or_default(settings_path.as_deref());
            if next != *store.snapshot() {
                let version = store.replace(next);
                println!(
                    "{} {}",
                    timestamp(),
                    style(format!("Settings changed (version {}), re-scoring", version)).yellow()
                );
            }
        }
        total += rescan(&mut scanner, &snapshot_path);
    }

    println!("\n{} items scored during watch session.", total);
    Ok(())
}

fn timestamp() -> console::StyledObject<String> {
    style(format!("[{}]", chrono::Local::now().format("%H:%M:%S"))).dim()
}

/// One scan pass; returns how many items were newly scored
fn rescan(scanner: &mut Scanner, snapshot: &Path) -> usize {
    // A snapshot caught mid-write fails to parse; the next event retries
    let page = match load_snapshot(snapshot) {
        Ok(page) => page,
        Err(e) => {
            warn!("Skipping unreadable snapshot {}: {}", snapshot.display(), e);
            return 0;
        }
    };
    let report = scanner.scan(&page);
    print_report(&report);
    report.verdicts.len()
}

fn print_report(report: &ScanReport) {
    if report.verdicts.is_empty() {
        println!(
            "{} {}",
            timestamp(),
            style(format!(
                "no new items ({} seen, {} not readable)",
                report.skipped, report.unreadable
            ))
            .dim()
        );
        return;
    }

    let s = &report.summary;
    println!(
        "{} {} new: {} shown, {} dimmed, {} hidden",
        timestamp(),
        style(report.verdicts.len()).cyan().bold(),
        s.visible,
        s.dimmed,
        s.suppressed
    );
    for verdict in &report.verdicts {
        println!("  {}", render_verdict_line(verdict));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_matches_exact_paths() {
        let snapshot = PathBuf::from("/tmp/w/page.json");
        let settings = PathBuf::from("/tmp/w/settings.toml");
        let paths = vec![
            PathBuf::from("/tmp/w/page.json"),
            PathBuf::from("/tmp/w/other.json"),
            PathBuf::from("/tmp/w/settings.toml"),
        ];
        assert_eq!(
            classify(&paths, &snapshot, Some(&settings)),
            vec![WatchEvent::SnapshotChanged, WatchEvent::SettingsChanged]
        );
        assert_eq!(
            classify(&paths[2..], &snapshot, None),
            Vec::<WatchEvent>::new()
        );
    }

    #[test]
    fn test_absolute_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("settings.toml");
        let abs = absolute(&missing).unwrap();
        assert!(abs.is_absolute());
        assert_eq!(abs.file_name().unwrap(), "settings.toml");
    }
}

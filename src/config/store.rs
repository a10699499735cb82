//! Process-wide settings store
//!
//! The store owns the current [`FilterConfig`]. Readers take an immutable
//! `Arc` snapshot and keep it for the whole computation; writers replace the
//! snapshot and bump a version number. Subscribers receive every new
//! snapshot over a channel.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, warn};

use super::settings::FilterConfig;

#[derive(Debug)]
struct Current {
    config: Arc<FilterConfig>,
    version: u64,
}

/// Shared owner of the active settings
#[derive(Debug)]
pub struct SettingsStore {
    current: RwLock<Current>,
    subscribers: Mutex<Vec<Sender<Arc<FilterConfig>>>>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl SettingsStore {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            current: RwLock::new(Current {
                config: Arc::new(config.normalized()),
                version: 0,
            }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current settings
    pub fn snapshot(&self) -> Arc<FilterConfig> {
        self.snapshot_with_version().0
    }

    /// Current settings and the version they were published under
    pub fn snapshot_with_version(&self) -> (Arc<FilterConfig>, u64) {
        let current = self.current.read().unwrap_or_else(|e| e.into_inner());
        (Arc::clone(&current.config), current.version)
    }

    pub fn version(&self) -> u64 {
        self.snapshot_with_version().1
    }

    /// Replace the settings wholesale. Returns the new version.
    pub fn replace(&self, config: FilterConfig) -> u64 {
        let config = config.normalized();
        self.update(|_| Some(config))
    }

    /// Apply a partial change notification.
    ///
    /// Invalid keys are logged and skipped. Nothing is published when the
    /// resulting settings are identical to the current ones.
    pub fn apply_changes(&self, changes: &Map<String, Value>) -> u64 {
        self.update(|current| {
            let mut next = current.clone();
            for (key, e) in next.apply_changes(changes) {
                warn!("Rejected setting change '{}': {}", key, e);
            }
            if next == *current {
                debug!("Settings change left configuration untouched");
                return None;
            }
            Some(next)
        })
    }

    /// Receive every snapshot published after this call
    pub fn subscribe(&self) -> Receiver<Arc<FilterConfig>> {
        let (tx, rx) = unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    /// Read-modify-write under one write guard; `None` keeps the current settings.
    ///
    /// Lock order is `current` then `subscribers`. The subscriber lock is
    /// taken before the write guard is released so notifications go out in
    /// version order.
    fn update<F>(&self, change: F) -> u64
    where
        F: FnOnce(&FilterConfig) -> Option<FilterConfig>,
    {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let Some(next) = change(&*current.config) else {
            return current.version;
        };
        let config = Arc::new(next);
        current.config = Arc::clone(&config);
        current.version += 1;
        let version = current.version;

        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        drop(current);
        debug!("Published settings version {}", version);
        subscribers.retain(|tx| tx.send(Arc::clone(&config)).is_ok());
        version
    }
}

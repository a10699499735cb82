//! Filter settings
//!
//! Settings live in a flat key-value file. TOML is preferred, JSON is
//! accepted when the file ends in `.json` (a dump of browser sync storage
//! works as-is):
//!
//! ```toml
//! # ~/.config/aiq/settings.toml
//! enabled = true
//! threshold = 60
//! dimInsteadOfHide = false
//! requireTag = false
//! minTitleChars = 25
//! manualViewerHandle = ""
//! ```
//!
//! Older key names (`requireSubFlair`, `myUsername`) are still accepted.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while reading, changing or writing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings file must contain a flat table of keys")]
    NotATable,

    #[error("Unknown setting '{0}'")]
    UnknownKey(String),

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("Could not determine config directory")]
    NoConfigDir,
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Lowest and highest meaningful threshold
pub const THRESHOLD_RANGE: (i64, i64) = (0, 100);

/// One complete settings snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    /// Global kill-switch
    pub enabled: bool,
    /// Items scoring below this are "low"
    pub threshold: i64,
    /// Dim low items instead of hiding them
    pub dim_instead_of_hide: bool,
    /// Treat untagged items as low
    pub require_tag: bool,
    pub min_title_chars: u32,
    /// Viewer handle to use in addition to the detected one
    pub manual_viewer_handle: String,
    /// Log per-pass counts at info level
    pub debug: bool,
    /// Also protect a reply that is the focus of a permalink view
    pub guard_focused_replies: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 60,
            dim_instead_of_hide: false,
            require_tag: false,
            min_title_chars: 25,
            manual_viewer_handle: String::new(),
            debug: false,
            guard_focused_replies: false,
        }
    }
}

impl FilterConfig {
    /// Threshold clamped to [`THRESHOLD_RANGE`]
    pub fn effective_threshold(&self) -> i64 {
        self.threshold.clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1)
    }

    /// Copy with every field brought into its valid range
    pub fn normalized(mut self) -> Self {
        self.threshold = self.effective_threshold();
        self.manual_viewer_handle = self.manual_viewer_handle.trim().to_string();
        self
    }

    /// Apply a single key/value change.
    ///
    /// Keys use the camelCase names of the settings file; legacy names are
    /// accepted. A `null` value leaves the setting untouched.
    pub fn apply_change(&mut self, key: &str, value: &Value) -> SettingsResult<()> {
        if value.is_null() {
            return Ok(());
        }
        match key {
            "enabled" => self.enabled = expect_bool(key, value)?,
            "threshold" => {
                self.threshold = expect_integer(key, value)?
                    .clamp(THRESHOLD_RANGE.0, THRESHOLD_RANGE.1)
            }
            "dimInsteadOfHide" => self.dim_instead_of_hide = expect_bool(key, value)?,
            "requireTag" | "requireSubFlair" => self.require_tag = expect_bool(key, value)?,
            "minTitleChars" => {
                let n = expect_integer(key, value)?;
                self.min_title_chars = u32::try_from(n.max(0)).unwrap_or(u32::MAX);
            }
            "manualViewerHandle" | "myUsername" => {
                self.manual_viewer_handle = value
                    .as_str()
                    .ok_or_else(|| invalid(key, "a string"))?
                    .trim()
                    .to_string()
            }
            "debug" => self.debug = expect_bool(key, value)?,
            "guardFocusedReplies" => self.guard_focused_replies = expect_bool(key, value)?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply every change in `changes`, skipping the ones that are rejected.
    ///
    /// Returns the rejected keys with their errors.
    pub fn apply_changes(&mut self, changes: &Map<String, Value>) -> Vec<(String, SettingsError)> {
        let mut rejected = Vec::new();
        for (key, value) in changes {
            if let Err(e) = self.apply_change(key, value) {
                rejected.push((key.clone(), e));
            }
        }
        rejected
    }

    /// Build settings from a flat key-value map on top of the defaults
    pub fn from_entries(entries: &Map<String, Value>) -> Self {
        let mut config = Self::default();
        for (key, e) in config.apply_changes(entries) {
            warn!("Ignoring setting '{}': {}", key, e);
        }
        config
    }
}

fn invalid(key: &str, expected: &'static str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        expected,
    }
}

fn expect_bool(key: &str, value: &Value) -> SettingsResult<bool> {
    value.as_bool().ok_or_else(|| invalid(key, "true or false"))
}

fn expect_integer(key: &str, value: &Value) -> SettingsResult<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if let Some(f) = value.as_f64().filter(|f| f.is_finite()) {
        return Ok(f.round() as i64);
    }
    // Form inputs arrive as strings
    value
        .as_str()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .ok_or_else(|| invalid(key, "an integer"))
}

/// Default settings file location (`<config dir>/aiq/settings.toml`)
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("aiq").join("settings.toml"))
}

/// Explicit path if given, otherwise the default location
pub fn resolve_settings_path(explicit: Option<&Path>) -> SettingsResult<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_settings_path().ok_or(SettingsError::NoConfigDir),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Parse the raw key-value entries of a settings file
pub fn read_entries(path: &Path) -> SettingsResult<Map<String, Value>> {
    let content = std::fs::read_to_string(path)?;
    let value = if is_json(path) {
        serde_json::from_str::<Value>(&content)?
    } else {
        let table: toml::Table = toml::from_str(&content)?;
        serde_json::to_value(table)?
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SettingsError::NotATable),
    }
}

/// Load settings from `path`
pub fn load_settings(path: &Path) -> SettingsResult<FilterConfig> {
    let entries = read_entries(path)?;
    debug!("Loaded {} settings from {}", entries.len(), path.display());
    Ok(FilterConfig::from_entries(&entries))
}

/// Load settings, falling back to defaults when the file is missing or broken
pub fn load_or_default(path: Option<&Path>) -> FilterConfig {
    let Some(path) = path.filter(|p| p.exists()) else {
        debug!("No settings file found, using defaults");
        return FilterConfig::default();
    };
    match load_settings(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            FilterConfig::default()
        }
    }
}

/// Write `config` to `path` in the format implied by its extension
pub fn save_settings(path: &Path, config: &FilterConfig) -> SettingsResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string(config)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a commented settings file if none exists
pub fn init_settings_file(path: &Path) -> SettingsResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        if is_json(path) {
            save_settings(path, &FilterConfig::default())?;
        } else {
            let example = r#"# aiq settings

# Master switch. When false every item stays visible.
enabled = true

# Items scoring below this (0-100) are filtered.
threshold = 60

# Dim filtered items instead of hiding them.
dimInsteadOfHide = false

# Filter items that carry no category tag.
requireTag = false

# Titles at least this long earn a bonus.
minTitleChars = 25

# Your handle, if it cannot be detected from the page.
manualViewerHandle = ""

# Also protect a reply opened via its permalink.
# guardFocusedReplies = false
"#;
            std::fs::write(path, example)?;
        }
    }

    Ok(path.to_path_buf())
}

/// Parse a command-line value: booleans and integers first, then plain strings
pub fn parse_cli_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(b) = trimmed.parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    Value::String(trimmed.to_string())
}

/// Set one key in the settings file at `path`, creating it when missing
pub fn set_value(path: &Path, key: &str, raw: &str) -> SettingsResult<FilterConfig> {
    let mut config = if path.exists() {
        load_settings(path)?
    } else {
        FilterConfig::default()
    };
    config.apply_change(key, &parse_cli_value(raw))?;
    save_settings(path, &config)?;
    Ok(config)
}

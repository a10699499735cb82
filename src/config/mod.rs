//! Configuration module for aiq
//!
//! This module handles:
//! - Filter settings and their defaults
//! - Loading/saving the flat settings file (TOML or JSON)
//! - The shared store that hands out immutable snapshots

mod settings;
mod store;

pub use settings::{
    default_settings_path,
    init_settings_file,
    load_or_default,
    load_settings,
    parse_cli_value,
    read_entries,
    resolve_settings_path,
    save_settings,
    set_value,
    FilterConfig,
    SettingsError,
    SettingsResult,
    THRESHOLD_RANGE,
};
pub use store::SettingsStore;

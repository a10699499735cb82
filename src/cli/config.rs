//! `aiq config` - settings file management

use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

use super::ConfigAction;
use aiq::config::{
    init_settings_file, load_or_default, resolve_settings_path, set_value, FilterConfig,
};

/// Settings path the commands read from, if one can be resolved
pub(crate) fn settings_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_settings_path(explicit).ok()
}

/// Current settings; defaults when the file is missing or broken
pub(crate) fn load(explicit: Option<&Path>) -> FilterConfig {
    load_or_default(settings_path(explicit).as_deref())
}

pub fn run(explicit: Option<&Path>, action: ConfigAction) -> Result<()> {
    let path = resolve_settings_path(explicit).context("Cannot locate a settings file")?;
    match action {
        ConfigAction::Init => {
            let existed = path.exists();
            init_settings_file(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            if existed {
                println!(
                    "{} Settings already exist at {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            } else {
                println!(
                    "{} Settings initialized at {}",
                    style("✓").green(),
                    style(path.display()).cyan()
                );
            }
            Ok(())
        }
        ConfigAction::Show => {
            let status = if path.exists() { "✓" } else { "(not found, using defaults)" };
            println!("Settings: {} {}", style(path.display()).cyan(), status);
            println!();
            print_settings(&load_or_default(Some(&path)));
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let config = set_value(&path, &key, &value)
                .with_context(|| format!("Failed to set '{}'", key))?;
            println!("{} Set {} in {}", style("✓").green(), key, path.display());
            println!();
            print_settings(&config);
            Ok(())
        }
    }
}

fn print_settings(config: &FilterConfig) {
    let row = |key: &str, value: String| println!("  {:<22} {}", style(key).bold(), value);
    row("enabled", config.enabled.to_string());
    row("threshold", config.effective_threshold().to_string());
    row("dimInsteadOfHide", config.dim_instead_of_hide.to_string());
    row("requireTag", config.require_tag.to_string());
    row("minTitleChars", config.min_title_chars.to_string());
    let manual = if config.manual_viewer_handle.is_empty() {
        style("(not set)".to_string()).dim().to_string()
    } else {
        config.manual_viewer_handle.clone()
    };
    row("manualViewerHandle", manual);
    row("guardFocusedReplies", config.guard_focused_replies.to_string());
    row("debug", config.debug.to_string());
}

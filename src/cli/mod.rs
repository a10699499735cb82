//! CLI command definitions and handlers

mod config;
mod scan;
mod score;
mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aiq - quality filter for discussion feeds
///
/// Everything runs locally. Snapshots and settings never leave your machine.
#[derive(Parser, Debug)]
#[command(name = "aiq")]
#[command(
    version,
    about = "Score discussion feed items and decide which to show, dim or hide",
    after_help = "\
Examples:
  aiq score --title \"New LoRA paper\" --body \"Because the benchmark...\"
  aiq score --record item.json --explain    Show every scoring term
  aiq readability \"The cat sat.\"             Reading-ease estimate
  aiq scan page.json --format json          Verdicts for a page snapshot
  aiq watch page.json                       Re-scan whenever the snapshot changes
  aiq config set threshold 70               Change a setting"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Settings file (default: <config dir>/aiq/settings.toml)
    #[arg(long, global = true, env = "AIQ_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single item
    #[command(after_help = "\
Examples:
  aiq score --title \"Why int8 quantization hurts latency\" --tag --links 2
  aiq score --record item.json --json")]
    Score {
        /// Item title
        #[arg(long, default_value = "", conflicts_with = "record")]
        title: String,

        /// Item body text
        #[arg(long, default_value = "", conflicts_with = "record")]
        body: String,

        /// Item carries a category tag
        #[arg(long, conflicts_with = "record")]
        tag: bool,

        /// Number of external links
        #[arg(long, default_value = "0", conflicts_with = "record")]
        links: u32,

        /// Number of replies
        #[arg(long, default_value = "0", conflicts_with = "record")]
        replies: u64,

        /// Number of approvals
        #[arg(long, default_value = "0", conflicts_with = "record")]
        approvals: u64,

        /// Author handle
        #[arg(long, default_value = "", conflicts_with = "record")]
        author: String,

        /// Read the item from a JSON record file instead
        #[arg(long)]
        record: Option<PathBuf>,

        /// Override the minimum title length from settings
        #[arg(long)]
        min_title_chars: Option<u32>,

        /// Your handle, for the ownership check
        #[arg(long)]
        viewer: Option<String>,

        /// Show the full scoring breakdown
        #[arg(long)]
        explain: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reading-ease estimate of a text
    Readability {
        /// Text to measure
        text: String,
    },

    /// Score every item of a page snapshot
    Scan {
        /// Page snapshot (JSON)
        snapshot: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Viewer handle to assume when the page chrome shows none
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Watch a page snapshot and the settings file, re-scanning on change
    Watch {
        /// Page snapshot (JSON)
        snapshot: PathBuf,

        /// Viewer handle to assume when the page chrome shows none
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version info
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize settings file with commented defaults
    Init,
    /// Show current settings and their path
    Show,
    /// Set a settings value
    Set {
        /// Settings key (e.g., threshold, dimInsteadOfHide)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings.as_deref();
    match cli.command {
        Commands::Score {
            title,
            body,
            tag,
            links,
            replies,
            approvals,
            author,
            record,
            min_title_chars,
            viewer,
            explain,
            json,
        } => {
            let record = match record {
                Some(path) => score::load_record(&path)?,
                None => aiq::models::Record::new(title, body)
                    .with_tag(tag)
                    .with_links(links)
                    .with_replies(replies)
                    .with_approvals(approvals)
                    .with_author(author),
            };
            score::run(settings, &record, min_title_chars, viewer, explain, json)
        }

        Commands::Readability { text } => score::readability(&text),

        Commands::Scan {
            snapshot,
            format,
            viewer,
        } => scan::run(settings, &snapshot, &format, viewer),

        Commands::Watch { snapshot, viewer } => watch::run(settings, &snapshot, viewer),

        Commands::Config { action } => config::run(settings, action),

        Commands::Version => {
            println!("aiq {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

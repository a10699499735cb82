//! aiq - quality filter for discussion feeds
//!
//! Scores feed items with surface heuristics (length, vocabulary, links,
//! readability, engagement) and decides per item whether it stays visible,
//! is dimmed or is suppressed. The viewer's own items are never filtered.
//!
//! The scoring core ([`readability`], [`scoring`], [`ownership`], [`policy`])
//! is pure. Extraction from rendered pages, settings and scan orchestration
//! live in [`extract`], [`config`] and [`scan`].

pub mod config;
pub mod extract;
pub mod models;
pub mod ownership;
pub mod policy;
pub mod readability;
pub mod reporters;
pub mod scan;
pub mod scoring;

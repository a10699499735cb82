//! JSON reporter
//!
//! Outputs the full ScanReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::scan::ScanReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

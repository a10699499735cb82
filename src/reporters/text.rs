//! Text (terminal) reporter with colors and formatting

use crate::models::{Decision, Verdict};
use crate::scan::ScanReport;
use anyhow::Result;
use console::style;

/// Short tag for a decision
fn decision_tag(decision: Decision) -> &'static str {
    match decision {
        Decision::Visible => "SHOW",
        Decision::Dimmed => "DIM ",
        Decision::Suppressed => "HIDE",
    }
}

/// One line per verdict: decision, badge, item id
pub fn render_verdict_line(verdict: &Verdict) -> String {
    let tag = decision_tag(verdict.applied);
    let tag = match verdict.applied {
        Decision::Visible => style(tag).green(),
        Decision::Dimmed => style(tag).yellow(),
        Decision::Suppressed => style(tag).red(),
    };
    let mut line = format!(
        "{} {:<16} {}",
        tag,
        style(&verdict.badge).bold(),
        style(&verdict.item_id).dim()
    );
    if verdict.applied != verdict.decision {
        line.push_str(&format!(
            " {}",
            style(format!("(focused, would be {})", verdict.decision)).italic()
        ));
    }
    line
}

/// Render report as formatted terminal output
pub fn render(report: &ScanReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", style("aiq scan").bold()));
    out.push_str(&format!(
        "{}\n",
        style("──────────────────────────────────────").dim()
    ));
    out.push_str(&format!(
        "Viewer: {}  Generation: {}\n\n",
        report.viewer.as_deref().unwrap_or("(unknown)"),
        report.generation
    ));

    for verdict in &report.verdicts {
        out.push_str(&render_verdict_line(verdict));
        out.push('\n');
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n{} shown, {} dimmed, {} hidden ({} yours)",
        s.visible, s.dimmed, s.suppressed, s.own
    ));
    if report.skipped > 0 || report.unreadable > 0 {
        out.push_str(&format!(
            "  {}",
            style(format!(
                "[{} already seen, {} not readable]",
                report.skipped, report.unreadable
            ))
            .dim()
        ));
    }
    out.push('\n');
    Ok(out)
}

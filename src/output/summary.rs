//! Console summary of a finished run

use crate::orchestrator::OrchestrationReport;

/// Formats the short console summary of a report
pub fn format_report_summary(report: &OrchestrationReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str("=== Scrape Summary ===\n\n");
    out.push_str(&format!("  Total targets: {}\n", summary.total));
    out.push_str(&format!("  Successful: {}\n", summary.successful));
    out.push_str(&format!("  Failed: {}\n", summary.failed));
    if summary.skipped > 0 {
        out.push_str(&format!("  Skipped: {}\n", summary.skipped));
    }
    out.push_str(&format!("  Success rate: {}\n", summary.success_rate));
    out.push_str(&format!(
        "  Duration: {} ({} per target)\n",
        summary.duration, summary.avg_time_per_target
    ));

    if !report.failed.is_empty() {
        out.push_str(&format!("\nFailed Targets ({}):\n", report.failed.len()));
        for outcome in &report.failed {
            out.push_str(&format!(
                "  - {} [{}] after {} attempt(s): {}\n",
                outcome.target_name,
                outcome.target_id,
                outcome.attempts,
                outcome.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}

/// Prints the console summary to stdout
pub fn print_report_summary(report: &OrchestrationReport) {
    print!("{}", format_report_summary(report));
}

//! Markdown report generation
//!
//! Renders a finished run as a human-readable markdown document with the
//! summary figures, per-target results and failure details.

use crate::orchestrator::OrchestrationReport;
use crate::output::error::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown rendering of a report to `output_path`
pub fn generate_markdown_report(
    report: &OrchestrationReport,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &OrchestrationReport) -> String {
    let summary = &report.summary;
    let mut md = String::new();

    md.push_str("# Hut Availability Scrape Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.start_time.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", summary.end_time.to_rfc3339()));
    md.push_str(&format!("- **Duration**: {}\n", summary.duration));
    md.push_str(&format!(
        "- **Average per target**: {}\n\n",
        summary.avg_time_per_target
    ));

    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Total Targets**: {}\n", summary.total));
    md.push_str(&format!("- **Successful**: {}\n", summary.successful));
    md.push_str(&format!("- **Failed**: {}\n", summary.failed));
    md.push_str(&format!("- **Skipped**: {}\n", summary.skipped));
    md.push_str(&format!("- **Success Rate**: {}\n\n", summary.success_rate));

    if !report.successful.is_empty() {
        md.push_str("## Successful Targets\n\n");
        md.push_str("| Target | Provider | Attempts | Sub-resources | Records | Time |\n");
        md.push_str("|--------|----------|----------|---------------|---------|------|\n");

        for outcome in &report.successful {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {:.2}s |\n",
                outcome.target_name,
                outcome.provider_type,
                outcome.attempts,
                outcome.sub_resources_scraped.unwrap_or(0),
                outcome.availability_records.unwrap_or(0),
                outcome.duration_ms as f64 / 1000.0
            ));
        }
        md.push('\n');
    }

    if !report.failed.is_empty() {
        md.push_str("## Failed Targets\n\n");
        md.push_str("| Target | Provider | Attempts | Error |\n");
        md.push_str("|--------|----------|----------|-------|\n");

        for outcome in &report.failed {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                outcome.target_name,
                outcome.provider_type,
                outcome.attempts,
                escape_cell(outcome.error.as_deref().unwrap_or("unknown error"))
            ));
        }
        md.push('\n');
    }

    if !report.skipped.is_empty() {
        md.push_str("## Skipped Targets\n\n");
        for target in &report.skipped {
            md.push_str(&format!("- {} ({})\n", target.name, target.id));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str("*Generated by Hut-Ripple*\n");

    md
}

/// Keeps table cells on one line and pipes from splitting columns
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

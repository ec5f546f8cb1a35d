//! JSON report export

use crate::orchestrator::OrchestrationReport;
use crate::output::error::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes a report as pretty-printed JSON
pub fn report_to_json(report: &OrchestrationReport) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a report as pretty-printed JSON to `output_path`
///
/// # Arguments
///
/// * `report` - The finished run report
/// * `output_path` - Destination file, created or truncated
pub fn write_json_report(report: &OrchestrationReport, output_path: &Path) -> OutputResult<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

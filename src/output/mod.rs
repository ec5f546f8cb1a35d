//! Output module for run reports
//!
//! This module handles:
//! - Exporting the final report as JSON
//! - Rendering a markdown version of the report
//! - Printing a console summary

mod error;
mod json;
mod markdown;
mod summary;

pub use error::{OutputError, OutputResult};
pub use json::{report_to_json, write_json_report};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use summary::{format_report_summary, print_report_summary};

//! JSON reporter
//!
//! Outputs the full CoverageReport as pretty-printed JSON.
//! Not-applicable figures are written as the string `"NA"`.

use crate::models::CoverageReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &CoverageReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

//! Output reporters for coverage results
//!
//! Supports multiple output formats:
//! - `text` - Plain text report (RBT table, listing, per-tag coverage)
//! - `json` - Machine-readable JSON of the coverage report
//! - `html` - Standalone HTML report
//! - `markdown` - GitHub-flavored Markdown
//!
//! Reporters only project what the engine computed. They receive the
//! feature set (input order, risks already filled in) and the ranked
//! [`CoverageReport`] as separate arguments.

mod html;
mod json;
mod markdown;
mod text;

pub(crate) use html::html_escape;

use crate::models::{CoverageReport, CriterionStatus, FeatureSet, ModalityTag};
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, html, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a coverage report in the specified format
pub fn report(set: &FeatureSet, result: &CoverageReport, format: &str) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(set, result, fmt)
}

/// Render a coverage report using an OutputFormat enum
pub fn report_with_format(
    set: &FeatureSet,
    result: &CoverageReport,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(set, result),
        OutputFormat::Json => json::render(result),
        OutputFormat::Html => html::render(set, result),
        OutputFormat::Markdown => markdown::render(set, result),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Html => "html",
        OutputFormat::Markdown => "md",
    }
}

/// A criterion waiting on work, for the TODO / InProgress lists
pub(crate) struct PendingItem<'a> {
    pub feature: &'a str,
    pub description: &'a str,
}

/// TODO and InProgress criteria in input order
pub(crate) fn pending_items(set: &FeatureSet) -> (Vec<PendingItem<'_>>, Vec<PendingItem<'_>>) {
    let mut todo = Vec::new();
    let mut in_progress = Vec::new();
    for feature in &set.features {
        for ac in &feature.acceptance_criteria {
            let item = PendingItem {
                feature: &feature.name,
                description: &ac.description,
            };
            match ac.status {
                CriterionStatus::Todo => todo.push(item),
                CriterionStatus::InProgress => in_progress.push(item),
                _ => {}
            }
        }
    }
    (todo, in_progress)
}

/// Modality columns present in the report, in column order
pub(crate) fn columns(result: &CoverageReport) -> Vec<ModalityTag> {
    result.total_coverage.keys().copied().collect()
}

/// Comma-joined tag list, `-` when empty
pub(crate) fn join_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

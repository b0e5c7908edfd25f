//! Test run results
//!
//! A run file mirrors the checklist: one entry per planned feature with its
//! planned criteria. Testers fill in `passed`, `how_tested` and `notes`,
//! then the run report summarizes the outcome.

use crate::loader::{LoadError, LoadResult};
use crate::models::FeatureSet;
use crate::reporters::html_escape;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Recorded outcome of a test run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(default)]
    pub test_run: Vec<TestRunFeature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRunFeature {
    pub feature: String,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub acceptance_criteria: Vec<TestRunCriterion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRunCriterion {
    pub description: String,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub how_tested: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Criterion counts over a run; unrecorded results are neither passed nor failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestRun {
    /// Empty run for the planned features and criteria of `set`
    pub fn skeleton(set: &FeatureSet) -> Self {
        let test_run = set
            .features
            .iter()
            .filter(|f| f.is_for_test())
            .map(|f| TestRunFeature {
                feature: f.name.clone(),
                passed: None,
                acceptance_criteria: f
                    .acceptance_criteria
                    .iter()
                    .filter(|ac| ac.is_for_test())
                    .map(|ac| TestRunCriterion {
                        description: ac.description.clone(),
                        ..Default::default()
                    })
                    .collect(),
            })
            .collect();
        TestRun { test_run }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for ac in self.test_run.iter().flat_map(|f| &f.acceptance_criteria) {
            summary.total += 1;
            match ac.passed {
                Some(true) => summary.passed += 1,
                Some(false) => summary.failed += 1,
                None => {}
            }
        }
        summary
    }
}

/// Read a filled-in run results file
pub fn load(path: &Path) -> LoadResult<TestRun> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let run: TestRun = serde_yaml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} test run entries from {}", run.test_run.len(), path.display());
    Ok(run)
}

fn outcome_mark(passed: Option<bool>) -> &'static str {
    match passed {
        Some(true) => "✅",
        Some(false) => "❌",
        None => "[ ]",
    }
}

fn outcome_label(passed: Option<bool>) -> (&'static str, &'static str) {
    match passed {
        Some(true) => ("Passed", "passed"),
        Some(false) => ("Failed", "failed"),
        None => ("No result", "pending"),
    }
}

/// Render the run report as Markdown
pub fn render_markdown(run: &TestRun) -> String {
    let summary = run.summary();
    let mut md = String::from("# Test Run Report\n\n");
    md.push_str(&format!(
        "**Total tests:** {} | **Passed:** {} | **Failed:** {}\n\n",
        summary.total, summary.passed, summary.failed
    ));
    for feature in &run.test_run {
        md.push_str(&format!("## Feature: {}\n", feature.feature));
        md.push_str(&format!("- Passed: {}\n", outcome_mark(feature.passed)));
        for ac in &feature.acceptance_criteria {
            let mark = if ac.passed == Some(true) { "x" } else { " " };
            md.push_str(&format!("  - [{}] {}\n", mark, ac.description));
            md.push_str(&format!(
                "    How tested: {}\n",
                ac.how_tested.as_deref().unwrap_or("")
            ));
            if !ac.notes.is_empty() {
                md.push_str(&format!("    Notes: {}\n", ac.notes));
            }
        }
        md.push('\n');
    }
    md
}

/// Render the run report as a standalone HTML page
pub fn render_html(run: &TestRun) -> String {
    let summary = run.summary();
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Test Run Report</title>\n<style>\n\
         body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 2rem; }\n\
         .passed { color: #2ecc40; }\n\
         .failed { color: #ff4136; }\n\
         .pending { color: #888; }\n\
         li > span { font-weight: bold; }\n\
         </style>\n</head>\n<body>\n<h1>Test Run Report</h1>\n",
    );
    html.push_str(&format!(
        "<div><b>Total tests:</b> {} | <b>Passed:</b> {} | <b>Failed:</b> {}</div>\n",
        summary.total, summary.passed, summary.failed
    ));
    for feature in &run.test_run {
        let (label, class) = outcome_label(feature.passed);
        html.push_str(&format!(
            "<section>\n<h2>Feature: <span class=\"{class}\">{}</span></h2>\n\
             <div><b>Status:</b> <span class=\"{class}\">{label}</span></div>\n<ul>\n",
            html_escape(&feature.feature)
        ));
        for ac in &feature.acceptance_criteria {
            let (_, class) = outcome_label(ac.passed);
            html.push_str(&format!(
                "<li><span class=\"{class}\">{}</span>\n<ul>\n<li>How tested: {}</li>\n",
                html_escape(&ac.description),
                html_escape(ac.how_tested.as_deref().unwrap_or(""))
            ));
            if !ac.notes.is_empty() {
                html.push_str(&format!("<li>Notes: {}</li>\n", html_escape(&ac.notes)));
            }
            html.push_str("</ul></li>\n");
        }
        html.push_str("</ul>\n</section>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

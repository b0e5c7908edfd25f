//! Plain text reporter
//!
//! Mirrors the console summary without colors, suitable for `.txt` files.

use super::{columns, join_tags, pending_items};
use crate::models::{format_rating, CoverageReport, FeatureSet};
use anyhow::Result;

/// Render report as plain text
pub fn render(set: &FeatureSet, report: &CoverageReport) -> Result<String> {
    let mut out = String::from("Feature Risk & RBT Report\n");

    // RBT table (ranked)
    out.push_str("\nRBT - Severity & Risk per feature:\n");
    out.push_str("Feature | Tags | Severity | Risk\n");
    for f in &report.features {
        out.push_str(&format!(
            "{} | {} | {} | {}\n",
            f.name,
            join_tags(&f.tags),
            format_rating(f.severity),
            format_rating(f.risk)
        ));
    }

    // Coverage per feature
    let cols = columns(report);
    out.push_str("\nCoverage per feature:\n");
    let header: Vec<String> = cols.iter().map(|t| t.to_string()).collect();
    out.push_str(&format!("Feature | {} | Summary\n", header.join(" | ")));
    for f in &report.features {
        let cells: Vec<String> = cols
            .iter()
            .map(|t| f.coverage.get(t).map(|c| c.to_string()).unwrap_or_default())
            .collect();
        out.push_str(&format!(
            "{} | {} | {}\n",
            f.name,
            cells.join(" | "),
            f.summary_coverage
        ));
    }

    // Full listing
    out.push_str("\nAll features and acceptance criteria:\n");
    for f in &report.features {
        out.push_str(&format!(
            "- {} (S:{}, R:{})\n",
            f.name,
            format_rating(f.severity),
            format_rating(f.risk)
        ));
        out.push_str(&format!("  Tags: {}\n", join_tags(&f.tags)));
        out.push_str("  Acceptance Criteria:\n");
        for ac in &f.acceptance_criteria {
            out.push_str(&format!(
                "    {} | Tags: {} | Status: {} | Severity: {} | Complexity: {} | Risk: {}\n",
                ac.description,
                join_tags(&ac.tags),
                ac.status,
                format_rating(ac.severity),
                format_rating(ac.complexity),
                format_rating(ac.risk)
            ));
        }
    }

    let (todo, in_progress) = pending_items(set);
    if !todo.is_empty() {
        out.push_str("\nAcceptance criteria in TODO:\n");
        for item in &todo {
            out.push_str(&format!("TODO: {} - {}\n", item.feature, item.description));
        }
    }
    if !in_progress.is_empty() {
        out.push_str("\nAcceptance criteria in progress:\n");
        for item in &in_progress {
            out.push_str(&format!("InProgress: {} - {}\n", item.feature, item.description));
        }
    }

    out.push_str(&format!("\nOverall coverage: {}\n", report.overall_coverage));
    out.push_str("Coverage per tag:\n");
    for (tag, percent) in &report.total_coverage {
        let tally = report.tag_totals.get(tag).copied().unwrap_or_default();
        out.push_str(&format!(
            "  {}: {}% ({}/{})\n",
            tag, percent, tally.covered, tally.total
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_inputs;

    #[test]
    fn test_text_rbt_table_in_ranked_order() {
        let (set, report) = test_inputs();
        let out = render(&set, &report).unwrap();
        let checkout = out.find("Checkout | manualUI, automateAPI | 5 | 4").unwrap();
        let search = out.find("Search | manualAPI | - | -").unwrap();
        assert!(checkout < search);
    }

    #[test]
    fn test_text_coverage_and_pending() {
        let (set, report) = test_inputs();
        let out = render(&set, &report).unwrap();
        assert!(out.contains("Checkout | 50% | NA | NA | 100% | NA | 75%"));
        assert!(out.contains("TODO: Checkout - Shows receipt"));
        assert!(out.contains("InProgress: Search - Finds by <name>"));
        assert!(out.contains("Overall coverage: 38%"));
        assert!(out.contains("  manualUI: 50% (1/2)"));
        assert!(out.contains("  exploratoryTesting: 0% (0/0)"));
    }

    #[test]
    fn test_text_empty_report() {
        let set = FeatureSet::default();
        let report = crate::engine::analyze(&mut set.clone(), &Default::default());
        let out = render(&set, &report).unwrap();
        assert!(out.contains("Overall coverage: NA"));
        assert!(!out.contains("TODO:"));
    }
}

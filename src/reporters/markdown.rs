//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - GitHub wikis
//! - QA sign-off documents

use super::{columns, join_tags, pending_items};
use crate::models::{format_rating, Coverage, CoverageReport, FeatureSet};
use anyhow::Result;
use chrono::Utc;

/// Render report as GitHub-flavored Markdown
pub fn render(set: &FeatureSet, report: &CoverageReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_toc());
    md.push('\n');

    md.push_str(&render_tag_summary(report));
    md.push('\n');

    md.push_str(&render_feature_coverage(report));
    md.push('\n');

    md.push_str(&render_rbt(report));
    md.push('\n');

    md.push_str(&render_pending(set));
    md.push('\n');

    md.push_str(&render_criteria(set));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &CoverageReport) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

    format!(
        r#"# {} Feature Coverage Report

**Overall coverage: {}** | **Features: {}**

Generated: {}
"#,
        coverage_emoji(report.overall_coverage),
        report.overall_coverage,
        report.features.len(),
        timestamp
    )
}

fn render_toc() -> String {
    r#"## Table of Contents

- [Coverage Summary](#coverage-summary)
- [Coverage per Feature](#coverage-per-feature)
- [Risk per Feature](#risk-per-feature)
- [Pending Criteria](#pending-criteria)
- [Acceptance Criteria](#acceptance-criteria)
"#
    .to_string()
}

fn render_tag_summary(report: &CoverageReport) -> String {
    let mut md = String::from(
        "## Coverage Summary\n\n| Tag | Coverage | Verified | Total |\n|-----|----------|----------|-------|\n",
    );
    for (tag, percent) in &report.total_coverage {
        let tally = report.tag_totals.get(tag).copied().unwrap_or_default();
        md.push_str(&format!(
            "| {} | {}% | {} | {} |\n",
            tag, percent, tally.covered, tally.total
        ));
    }
    md
}

fn render_feature_coverage(report: &CoverageReport) -> String {
    if report.features.is_empty() {
        return "## Coverage per Feature\n\nNo features in this dataset.\n".to_string();
    }

    let cols = columns(report);
    let mut md = String::from("## Coverage per Feature\n\n| Feature |");
    for tag in &cols {
        md.push_str(&format!(" {} |", tag));
    }
    md.push_str(" Summary |\n|---------|");
    for _ in &cols {
        md.push_str("---|");
    }
    md.push_str("---|\n");

    for f in &report.features {
        md.push_str(&format!("| {} |", escape_cell(&f.name)));
        for tag in &cols {
            let cell = f.coverage.get(tag).copied().unwrap_or(Coverage::NotApplicable);
            md.push_str(&format!(" {} |", cell));
        }
        md.push_str(&format!(" **{}** |\n", f.summary_coverage));
    }
    md
}

fn render_rbt(report: &CoverageReport) -> String {
    let mut md = String::from(
        "## Risk per Feature\n\n| # | Feature | Tags | Severity | Risk |\n|---|---------|------|----------|------|\n",
    );
    for (i, f) in report.features.iter().enumerate() {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            i + 1,
            escape_cell(&f.name),
            join_tags(&f.tags),
            format_rating(f.severity),
            format_rating(f.risk)
        ));
    }
    md
}

fn render_pending(set: &FeatureSet) -> String {
    let (todo, in_progress) = pending_items(set);
    let mut md = String::from("## Pending Criteria\n\n");
    if todo.is_empty() && in_progress.is_empty() {
        md.push_str("Nothing pending.\n");
        return md;
    }
    for item in &todo {
        md.push_str(&format!("- [ ] **TODO:** {} - {}\n", item.feature, item.description));
    }
    for item in &in_progress {
        md.push_str(&format!(
            "- [ ] **InProgress:** {} - {}\n",
            item.feature, item.description
        ));
    }
    md
}

fn render_criteria(set: &FeatureSet) -> String {
    let mut md = String::from("## Acceptance Criteria\n\n");
    for feature in &set.features {
        md.push_str(&format!(
            "### {} (S:{}, R:{})\n\nTags: {}\n\n",
            feature.name,
            format_rating(feature.severity),
            format_rating(feature.risk),
            join_tags(&feature.tags)
        ));
        for ac in &feature.acceptance_criteria {
            let mark = if ac.status.is_verified() { "x" } else { " " };
            md.push_str(&format!(
                "- [{}] {} `{}` (S:{}, C:{}, R:{})\n",
                mark,
                ac.description,
                ac.status,
                format_rating(ac.severity),
                format_rating(ac.complexity),
                format_rating(ac.risk)
            ));
        }
        md.push('\n');
    }
    md
}

fn render_footer() -> String {
    r#"---

*Generated by fecov - feature coverage & risk reporting*
"#
    .to_string()
}

fn coverage_emoji(coverage: Coverage) -> &'static str {
    match coverage {
        Coverage::Percent(p) if p >= 80 => "✅",
        Coverage::Percent(p) if p >= 50 => "⚠️",
        Coverage::Percent(_) => "❌",
        Coverage::NotApplicable => "❓",
    }
}

/// Pipes would split a table row
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

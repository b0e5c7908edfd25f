//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be viewed in any browser.
//! Includes:
//! - Overall coverage and per-tag coverage cards
//! - TODO / InProgress acceptance criteria
//! - Per-feature coverage table with severity, risk and test case ids
//! - Per-criterion risk detail, colored by status
//! - RBT (risk-based testing) table

use super::{columns, join_tags, pending_items, PendingItem};
use crate::models::{
    format_rating, test_case_ids, Coverage, CoverageReport, CriterionStatus, FeatureSet,
};
use anyhow::Result;
use chrono::Utc;

/// Render report as standalone HTML
pub fn render(set: &FeatureSet, report: &CoverageReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head());
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report));
    html.push_str("<div class=\"content\">\n");

    html.push_str(&render_pending(set));
    html.push_str(&render_tag_summary(report));
    html.push_str(&render_coverage_table(report));
    html.push_str(&render_criteria_detail(set));
    html.push_str(&render_rbt_table(report));

    html.push_str("</div>\n"); // content
    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Feature Coverage Report</title>
    <style>
{CSS}
    </style>
</head>
"#
    )
}

fn render_header(report: &CoverageReport) -> String {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    format!(
        r#"<div class="header">
    <h1>Feature Coverage Report</h1>
    <div class="overall {}">Overall coverage: {}</div>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        coverage_class(report.overall_coverage),
        report.overall_coverage,
        timestamp
    )
}

fn render_pending(set: &FeatureSet) -> String {
    let (todo, in_progress) = pending_items(set);
    let mut html = String::new();
    html.push_str(&pending_list("Acceptance Criteria in TODO", "TODO", "pending-todo", &todo));
    html.push_str(&pending_list(
        "Acceptance Criteria in progress",
        "InProgress",
        "pending-progress",
        &in_progress,
    ));
    html
}

fn pending_list(title: &str, label: &str, class: &str, items: &[PendingItem<'_>]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let rows: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "        <li><b>{}:</b> {} - {}</li>",
                label,
                html_escape(item.feature),
                html_escape(item.description)
            )
        })
        .collect();
    format!(
        "<div class=\"section\">\n    <h3>{}</h3>\n    <ul class=\"{}\">\n{}\n    </ul>\n</div>\n",
        title,
        class,
        rows.join("\n")
    )
}

fn render_tag_summary(report: &CoverageReport) -> String {
    let cards: Vec<String> = report
        .total_coverage
        .iter()
        .map(|(tag, percent)| {
            let tally = report.tag_totals.get(tag).copied().unwrap_or_default();
            format!(
                r#"        <div class="metric-card">
            <h3>{}</h3>
            <div class="metric-value">{}%</div>
            <div class="metric-bar"><div class="metric-bar-fill {}" style="width: {}%"></div></div>
            <div class="metric-count"><b>{}</b> / {} verified</div>
        </div>"#,
                tag,
                percent,
                bar_class(*percent),
                percent,
                tally.covered,
                tally.total
            )
        })
        .collect();

    format!(
        r#"<div class="section">
    <h2 class="section-title">Coverage Summary</h2>
    <div class="metrics-grid">
{}
    </div>
</div>
"#,
        cards.join("\n")
    )
}

fn render_coverage_table(report: &CoverageReport) -> String {
    let cols = columns(report);
    let span = cols.len() + 2;

    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Detailed Coverage</h2>\n    <table>\n        <tr><th>Feature (Severity, Risk)</th>",
    );
    for tag in &cols {
        html.push_str(&format!("<th>{}</th>", tag));
    }
    html.push_str("<th>Summary</th></tr>\n");

    for f in &report.features {
        html.push_str(&format!(
            "        <tr><td>{} <span class=\"rating\">(S:{}, R:{})</span></td>",
            html_escape(&f.name),
            format_rating(f.severity),
            format_rating(f.risk)
        ));
        for tag in &cols {
            let cell = f.coverage.get(tag).copied().unwrap_or(Coverage::NotApplicable);
            html.push_str(&format!(
                "<td class=\"{}\">{}</td>",
                coverage_class(cell),
                cell
            ));
        }
        html.push_str(&format!(
            "<td class=\"{}\"><b>{}</b></td></tr>\n",
            coverage_class(f.summary_coverage),
            f.summary_coverage
        ));

        let (manual, automate) = test_case_ids(&f.acceptance_criteria);
        if !manual.is_empty() {
            html.push_str(&format!(
                "        <tr class=\"test-cases\"><td colspan=\"{}\">Manual test cases: {}</td></tr>\n",
                span,
                html_escape(&manual.join(", "))
            ));
        }
        if !automate.is_empty() {
            html.push_str(&format!(
                "        <tr class=\"test-cases\"><td colspan=\"{}\">Automated test cases: {}</td></tr>\n",
                span,
                html_escape(&automate.join(", "))
            ));
        }
    }

    html.push_str("    </table>\n</div>\n");
    html
}

fn render_criteria_detail(set: &FeatureSet) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Acceptance Criteria Risk</h2>\n",
    );
    for feature in &set.features {
        let heading_class = feature.status.map(status_class).unwrap_or("status-none");
        html.push_str(&format!(
            "    <h3 class=\"{}\">{} <span class=\"rating\">(S:{}, R:{})</span></h3>\n",
            heading_class,
            html_escape(&feature.name),
            format_rating(feature.severity),
            format_rating(feature.risk)
        ));
        if let Some(phase) = &feature.phase {
            html.push_str(&format!("    <div><b>Phase:</b> {}</div>\n", html_escape(phase)));
        }
        html.push_str(&format!(
            "    <div><b>Tags:</b> {}</div>\n    <ul class=\"criteria\">\n",
            html_escape(&join_tags(&feature.tags))
        ));
        for ac in &feature.acceptance_criteria {
            let phase = ac
                .phase
                .as_deref()
                .map(|p| format!(" | Phase: {}", html_escape(p)))
                .unwrap_or_default();
            html.push_str(&format!(
                "        <li class=\"{}\"><b>{}</b> <span class=\"rating\">(S:{}, C:{}, R:{})</span><br/>Status: {} | Tags: {}{}</li>\n",
                status_class(ac.status),
                html_escape(&ac.description),
                format_rating(ac.severity),
                format_rating(ac.complexity),
                format_rating(ac.risk),
                ac.status,
                html_escape(&join_tags(&ac.tags)),
                phase
            ));
        }
        html.push_str("    </ul>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_rbt_table(report: &CoverageReport) -> String {
    let rows: Vec<String> = report
        .features
        .iter()
        .map(|f| {
            format!(
                "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&f.name),
                html_escape(&join_tags(&f.tags)),
                format_rating(f.severity),
                format_rating(f.risk)
            )
        })
        .collect();
    format!(
        r#"<div class="section">
    <h2 class="section-title">RBT - Severity &amp; Risk per Feature</h2>
    <table>
        <tr><th>Feature</th><th>Tags</th><th>Severity</th><th>Risk</th></tr>
{}
    </table>
</div>
"#,
        rows.join("\n")
    )
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by fecov - feature coverage &amp; risk reporting</p>
</div>
"#
    .to_string()
}

fn status_class(status: CriterionStatus) -> &'static str {
    match status {
        CriterionStatus::Verified => "status-verified",
        CriterionStatus::NotVerified => "status-not-verified",
        CriterionStatus::InProgress => "status-in-progress",
        CriterionStatus::Todo => "status-todo",
    }
}

fn coverage_class(coverage: Coverage) -> &'static str {
    match coverage {
        Coverage::Percent(p) if p >= 80 => "cov-good",
        Coverage::Percent(p) if p >= 50 => "cov-moderate",
        Coverage::Percent(_) => "cov-poor",
        Coverage::NotApplicable => "cov-na",
    }
}

fn bar_class(percent: u32) -> &'static str {
    if percent >= 80 {
        "bar-good"
    } else if percent >= 50 {
        "bar-moderate"
    } else {
        "bar-poor"
    }
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #0f766e;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --border-color: #e2e8f0;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background: white;
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #0f766e 0%, #0891b2 100%);
    color: white;
    padding: 2.5rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.25rem; margin-bottom: 0.5rem; }
.header .overall { font-size: 1.5rem; font-weight: bold; }
.header .timestamp { opacity: 0.9; font-size: 0.95rem; }

.content { padding: 2rem; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 1rem;
}

.metric-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.metric-card h3 { font-size: 0.875rem; color: #64748b; margin-bottom: 0.5rem; }
.metric-value { font-size: 2rem; font-weight: bold; }
.metric-count { font-size: 0.875rem; color: #64748b; margin-top: 0.5rem; }

.metric-bar { height: 8px; background: #e2e8f0; border-radius: 4px; overflow: hidden; }
.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid var(--border-color); padding: 0.5rem 0.75rem; text-align: left; }
th { background: #f1f5f9; }

.cov-good { color: #059669; }
.cov-moderate { color: #b45309; }
.cov-poor { color: #dc2626; }
.cov-na { color: #94a3b8; }

.rating { color: #d32f2f; font-size: 0.875rem; }
.test-cases td { color: #7e22ce; background: #faf5ff; }

.pending-todo { background: #e6fcfa; color: #0e7490; padding: 0.75rem 2rem; border-radius: 6px; }
.pending-progress { background: #fff3e0; color: #c2410c; padding: 0.75rem 2rem; border-radius: 6px; }

.criteria { background: #f5f5f5; padding: 0.75rem 2rem; border-radius: 6px; margin: 0.5rem 0 1rem; }
.status-verified { color: #15803d; }
.status-not-verified { color: #b91c1c; }
.status-todo { color: #0891b2; }
.status-in-progress { color: #ea580c; }
.status-none { color: #475569; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_inputs;

    #[test]
    fn test_html_is_standalone_document() {
        let (set, report) = test_inputs();
        let html = render(&set, &report).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("Overall coverage: 38%"));
        assert!(html.contains(" UTC"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let (set, report) = test_inputs();
        let html = render(&set, &report).unwrap();
        assert!(html.contains("Finds by &lt;name&gt;"));
        assert!(!html.contains("Finds by <name>"));
    }

    #[test]
    fn test_html_lists_test_cases_and_pending() {
        let (set, report) = test_inputs();
        let html = render(&set, &report).unwrap();
        assert!(html.contains("Manual test cases: TC-12"));
        assert!(html.contains("Automated test cases: AT-3"));
        assert!(html.contains("<b>TODO:</b> Checkout - Shows receipt"));
        assert!(html.contains("<b>InProgress:</b> Search - Finds by &lt;name&gt;"));
        assert!(html.contains("<b>1</b> / 2 verified"));
    }

    #[test]
    fn test_html_has_one_column_per_tag() {
        let (set, report) = test_inputs();
        let html = render(&set, &report).unwrap();
        assert!(html.contains("<th>exploratoryTesting</th>"));
        assert!(html.contains("(S:4, C:3, R:4)"));
    }
}

//! Test plan checklist rendering
//!
//! Only features with `for_test: true` are listed, and within them only the
//! criteria with `for_test: true`.

use crate::models::{AcceptanceCriterion, Feature, FeatureSet};
use crate::reporters::html_escape;

fn planned(set: &FeatureSet) -> impl Iterator<Item = (&Feature, Vec<&AcceptanceCriterion>)> {
    set.features.iter().filter(|f| f.is_for_test()).map(|f| {
        let criteria = f
            .acceptance_criteria
            .iter()
            .filter(|ac| ac.is_for_test())
            .collect();
        (f, criteria)
    })
}

/// Render the checklist as Markdown
pub fn render_markdown(set: &FeatureSet) -> String {
    let mut md = String::from("# Test Plan Checklist\n\n");
    for (feature, criteria) in planned(set) {
        md.push_str(&format!("- [ ] **{}** passed: [ ]\n", feature.name));
        for ac in criteria {
            md.push_str(&format!("  - [ ] {} passed: [ ]\n", ac.description));
            if let Some(cases) = &ac.test_cases {
                if !cases.manual.is_empty() {
                    md.push_str(&format!(
                        "    - Manual test cases: {}\n",
                        cases.manual.join(", ")
                    ));
                }
                if !cases.automate.is_empty() {
                    md.push_str(&format!(
                        "    - Automated test cases: {}\n",
                        cases.automate.join(", ")
                    ));
                }
            }
            md.push_str("    - how_tested: [ ] manual [ ] automated\n");
        }
        md.push('\n');
    }
    md
}

/// Render the checklist as a standalone HTML page with checkboxes
pub fn render_html(set: &FeatureSet) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Test Plan Checklist</title>\n<style>\n\
         body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 2rem; }\n\
         .feature { margin-bottom: 1.25rem; }\n\
         ul { list-style: none; }\n\
         </style>\n</head>\n<body>\n<h1>Test Plan Checklist</h1>\n",
    );
    for (feature, criteria) in planned(set) {
        html.push_str(&format!(
            "<div class=\"feature\"><label><input type=\"checkbox\"> <b>{}</b></label> passed: <input type=\"checkbox\">\n<ul>\n",
            html_escape(&feature.name)
        ));
        for ac in criteria {
            html.push_str(&format!(
                "<li><label><input type=\"checkbox\"> {}</label> passed: <input type=\"checkbox\">\n<ul>\n",
                html_escape(&ac.description)
            ));
            if let Some(cases) = &ac.test_cases {
                if !cases.manual.is_empty() {
                    html.push_str(&format!(
                        "<li>Manual test cases: {}</li>\n",
                        html_escape(&cases.manual.join(", "))
                    ));
                }
                if !cases.automate.is_empty() {
                    html.push_str(&format!(
                        "<li>Automated test cases: {}</li>\n",
                        html_escape(&cases.automate.join(", "))
                    ));
                }
            }
            html.push_str(
                "<li>how_tested: <input type=\"checkbox\"> manual <input type=\"checkbox\"> automated</li>\n</ul></li>\n",
            );
        }
        html.push_str("</ul></div>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::TestCases;

    /// Two features, one of them planned with a single planned criterion
    pub(crate) fn plan_set() -> FeatureSet {
        FeatureSet {
            features: vec![
                Feature {
                    name: "Login".into(),
                    for_test: Some(true),
                    acceptance_criteria: vec![
                        AcceptanceCriterion {
                            description: "Rejects bad password".into(),
                            for_test: Some(true),
                            test_cases: Some(TestCases {
                                manual: vec!["TC-1".into(), "TC-2".into()],
                                automate: vec![],
                            }),
                            ..Default::default()
                        },
                        AcceptanceCriterion {
                            description: "Remembers user".into(),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                },
                Feature {
                    name: "Export".into(),
                    acceptance_criteria: vec![AcceptanceCriterion {
                        description: "Writes CSV".into(),
                        for_test: Some(true),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_markdown_lists_only_planned_items() {
        let md = render_markdown(&plan_set());
        assert!(md.contains("- [ ] **Login** passed: [ ]"));
        assert!(md.contains("  - [ ] Rejects bad password passed: [ ]"));
        assert!(md.contains("    - Manual test cases: TC-1, TC-2"));
        assert!(!md.contains("Automated test cases"));
        assert!(!md.contains("Remembers user"));
        assert!(!md.contains("Export"));
    }

    #[test]
    fn test_html_checklist() {
        let html = render_html(&plan_set());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<b>Login</b>"));
        assert!(html.contains("how_tested: <input type=\"checkbox\"> manual"));
        assert!(!html.contains("Writes CSV"));
    }

    #[test]
    fn test_empty_plan() {
        let md = render_markdown(&FeatureSet::default());
        assert_eq!(md, "# Test Plan Checklist\n\n");
    }
}

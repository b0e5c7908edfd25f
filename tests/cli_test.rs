//! CLI contract tests
//!
//! Runs the `fecov` binary inside temporary working directories and checks
//! the files it writes and its exit codes.

use std::path::{Path, PathBuf};
use std::process::Command;

fn fecov_bin() -> String {
    env!("CARGO_BIN_EXE_fecov").to_string()
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Temporary working directory holding copies of the given fixtures
fn setup_workspace(fixtures: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in fixtures {
        std::fs::copy(fixture(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn run_fecov(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(fecov_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run fecov");
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, stdout, stderr)
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// ============================================================================
// report
// ============================================================================

#[test]
fn test_default_command_writes_html_and_text() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let (code, stdout, _) = run_fecov(ws.path(), &[]);
    assert_eq!(code, 0);
    assert!(stdout.contains("checkout"));

    let reports = files_in(&ws.path().join("reports"));
    assert_eq!(reports.len(), 2, "got {:?}", reports);
    assert!(reports.iter().any(|n| n.starts_with("checkout_coverage_report_") && n.ends_with(".html")));
    assert!(reports.iter().any(|n| n.starts_with("checkout_coverage_report_") && n.ends_with(".txt")));
}

#[test]
fn test_no_timestamp_and_formats() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let (code, _, _) = run_fecov(
        ws.path(),
        &["report", "--no-timestamp", "--format", "json", "--format", "md", "-o", "out"],
    );
    assert_eq!(code, 0);
    assert_eq!(
        files_in(&ws.path().join("out")),
        vec!["checkout_coverage_report.json", "checkout_coverage_report.md"]
    );

    let json = std::fs::read_to_string(ws.path().join("out/checkout_coverage_report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["features"][0]["name"], "Checkout");
    assert_eq!(value["overall_coverage"], 25);
}

#[test]
fn test_rbt_prints_risk_table() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let (code, stdout, _) = run_fecov(ws.path(), &["report", "--rbt", "--no-timestamp"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("RBT - Severity & Risk per feature:"));
    assert!(stdout.contains("3.67"));
    let checkout = stdout.find("Checkout").unwrap();
    let wishlist = stdout.find("Wishlist").unwrap();
    assert!(checkout < wishlist);
}

#[test]
fn test_no_datasets_is_an_error() {
    let ws = setup_workspace(&[]);
    let (code, _, stderr) = run_fecov(ws.path(), &["report"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("No datasets found"));
}

#[test]
fn test_broken_dataset_does_not_stop_others() {
    let ws = setup_workspace(&["broken.fecov.yml", "checkout.fecov.yml"]);
    let (code, _, stderr) = run_fecov(ws.path(), &["report", "--no-timestamp", "--format", "text"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("broken.fecov.yml"));
    assert!(stderr.contains("1 of 2 datasets failed"));
    assert!(ws.path().join("reports/checkout_coverage_report.txt").exists());
}

#[test]
fn test_same_dataset_name_in_two_directories_is_rejected() {
    let ws = setup_workspace(&[]);
    for sub in ["a", "b"] {
        std::fs::create_dir_all(ws.path().join(sub)).unwrap();
        std::fs::copy(fixture("checkout.fecov.yml"), ws.path().join(sub).join("shop.fecov.yml")).unwrap();
    }
    let (code, _, stderr) = run_fecov(
        ws.path(),
        &["report", "-f", "a/shop.fecov.yml", "-f", "b/shop.fecov.yml", "--format", "text"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("same report files"));
    assert!(!ws.path().join("reports").exists());
}

#[test]
fn test_fail_under() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let (code, _, stderr) = run_fecov(ws.path(), &["report", "--fail-under", "80"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("--fail-under=80"));

    let (code, _, _) = run_fecov(ws.path(), &["report", "--fail-under", "25"]);
    assert_eq!(code, 0);
}

#[test]
fn test_config_file_sets_defaults() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    std::fs::write(
        ws.path().join("fecov.toml"),
        "[report]\noutput_dir = \"cfg-out\"\nformats = [\"markdown\"]\ntimestamp = false\n",
    )
    .unwrap();
    let (code, _, _) = run_fecov(ws.path(), &["report"]);
    assert_eq!(code, 0);
    assert_eq!(
        files_in(&ws.path().join("cfg-out")),
        vec!["checkout_coverage_report.md"]
    );
}

#[test]
fn test_unknown_config_tag_is_an_error() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    std::fs::write(ws.path().join("fecov.toml"), "[coverage]\ntags = [\"smoke\"]\n").unwrap();
    let (code, _, stderr) = run_fecov(ws.path(), &["report"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("smoke"));
}

// ============================================================================
// plan / run-report
// ============================================================================

#[test]
fn test_plan_writes_checklists_and_skeleton() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let (code, _, _) = run_fecov(ws.path(), &["plan", "-f", "checkout.fecov.yml"]);
    assert_eq!(code, 0);

    let plan_dir = ws.path().join("testPlan");
    let files = files_in(&plan_dir);
    assert!(files.iter().any(|n| n.starts_with("testPlan_") && n.ends_with(".md")));
    assert!(files.iter().any(|n| n.starts_with("testPlan_") && n.ends_with(".html")));
    assert!(files.contains(&"testRunResults.yml".to_string()));

    let skeleton = std::fs::read_to_string(plan_dir.join("testRunResults.yml")).unwrap();
    assert!(skeleton.contains("feature: Checkout"));
    assert!(skeleton.contains("Shows the receipt"));
    assert!(!skeleton.contains("Search"));
}

#[test]
fn test_plan_keeps_filled_results_without_force() {
    let ws = setup_workspace(&["checkout.fecov.yml"]);
    let plan_dir = ws.path().join("testPlan");
    std::fs::create_dir_all(&plan_dir).unwrap();
    std::fs::copy(fixture("testRunResults.yml"), plan_dir.join("testRunResults.yml")).unwrap();

    let (code, _, _) = run_fecov(ws.path(), &["plan", "-f", "checkout.fecov.yml"]);
    assert_eq!(code, 0);
    let kept = std::fs::read_to_string(plan_dir.join("testRunResults.yml")).unwrap();
    assert!(kept.contains("receipt email missing"));

    let (code, _, _) = run_fecov(ws.path(), &["plan", "-f", "checkout.fecov.yml", "--force"]);
    assert_eq!(code, 0);
    let replaced = std::fs::read_to_string(plan_dir.join("testRunResults.yml")).unwrap();
    assert!(!replaced.contains("receipt email missing"));
}

#[test]
fn test_plan_missing_feature_map() {
    let ws = setup_workspace(&[]);
    let (code, _, stderr) = run_fecov(ws.path(), &["plan"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("featureMap.yml"));
}

#[test]
fn test_run_report() {
    let ws = setup_workspace(&["testRunResults.yml"]);
    let (code, stdout, _) = run_fecov(
        ws.path(),
        &["run-report", "-r", "testRunResults.yml", "-o", "."],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Total: 2"));

    let md = std::fs::read_to_string(ws.path().join("testRunReport.md")).unwrap();
    assert!(md.contains("**Total tests:** 2 | **Passed:** 1 | **Failed:** 1"));
    assert!(md.contains("Notes: receipt email missing"));
    assert!(ws.path().join("testRunReport.html").exists());
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_then_report() {
    let ws = setup_workspace(&[]);
    let (code, _, _) = run_fecov(ws.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(ws.path().join("fecov.toml").exists());
    assert!(ws.path().join("example.fecov.yml").exists());

    let (code, _, _) = run_fecov(ws.path(), &["report", "--no-timestamp"]);
    assert_eq!(code, 0);
    assert!(ws.path().join("reports/example_coverage_report.html").exists());
    assert!(ws.path().join("reports/example_coverage_report.txt").exists());
}

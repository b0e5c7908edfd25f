//! Run-report command - summarize a filled-in test run results file

use super::resolve;
use crate::config::load_project_config;
use crate::testplan::{run as test_run, RUN_REPORT_STEM, RUN_RESULTS_FILE};
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Run the run-report command
pub fn run(dir: &Path, results: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let config = load_project_config(dir);
    let plan_dir = resolve(dir, &config.plan.output_dir);
    let results = match results {
        Some(path) => resolve(dir, &path),
        None => plan_dir.join(RUN_RESULTS_FILE),
    };
    let output_dir = match output_dir {
        Some(path) => resolve(dir, &path),
        None => plan_dir,
    };

    let run = test_run::load(&results)?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    for (ext, content) in [
        ("md", test_run::render_markdown(&run)),
        ("html", test_run::render_html(&run)),
    ] {
        let path = output_dir.join(format!("{}.{}", RUN_REPORT_STEM, ext));
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
    }

    let summary = run.summary();
    println!(
        "\n{} Total: {}  {} {}  {} {}",
        style("🧪").bold(),
        summary.total,
        style("passed").green(),
        summary.passed,
        style("failed").red(),
        summary.failed
    );
    Ok(())
}

//! Plan command - test plan checklist and run results skeleton

use super::resolve;
use crate::config::load_project_config;
use crate::loader::load_feature_set;
use crate::testplan::{checklist, TestRun, RUN_RESULTS_FILE};
use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use std::path::{Path, PathBuf};
use tracing::info;

/// Run the plan command
pub fn run(
    dir: &Path,
    file: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    force: bool,
) -> Result<()> {
    let config = load_project_config(dir);
    let source = resolve(dir, file.as_deref().unwrap_or(config.plan.feature_map.as_path()));
    let output_dir = resolve(
        dir,
        output_dir.as_deref().unwrap_or(config.plan.output_dir.as_path()),
    );

    let set = load_feature_set(&source)?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let md_path = output_dir.join(format!("testPlan_{}.md", timestamp));
    let html_path = output_dir.join(format!("testPlan_{}.html", timestamp));
    write(&md_path, &checklist::render_markdown(&set))?;
    write(&html_path, &checklist::render_html(&set))?;

    let run = TestRun::skeleton(&set);
    let results_path = output_dir.join(RUN_RESULTS_FILE);
    if results_path.exists() && !force {
        println!(
            "{} {} already exists, keeping it (use {} to replace)",
            style("!").yellow().bold(),
            style(results_path.display()).cyan(),
            style("--force").yellow()
        );
    } else {
        write(&results_path, &run.to_yaml()?)?;
    }

    info!(
        "Planned {} features from {}",
        run.test_run.len(),
        source.display()
    );
    println!(
        "\n{} Test plan: {} features, {} acceptance criteria",
        style("📋").bold(),
        run.test_run.len(),
        run.summary().total
    );
    Ok(())
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", style("✓").green(), style(path.display()).cyan());
    Ok(())
}

//! Init command - write a project config and an example dataset

use crate::config::CONFIG_FILE;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Example dataset written next to the config
pub const EXAMPLE_DATASET: &str = "example.fecov.yml";

const DEFAULT_CONFIG: &str = r#"# fecov configuration
# Every key is optional; command-line flags take precedence.

[coverage]
# Modality columns to report on
tags = ["manualUI", "manualAPI", "automateUI", "automateAPI", "exploratoryTesting"]

[report]
# Where `fecov report` writes files
output_dir = "reports"

# Formats written per dataset (text, json, html, markdown)
formats = ["html", "text"]

# Append a UTC timestamp to report file names
timestamp = true

# Exit with code 1 when a dataset's overall coverage is below this percentage
# fail_under = 80

[discovery]
# Datasets are the files in the working directory ending with this suffix
suffix = ".fecov.yml"

[plan]
# Test plan checklists and testRunResults.yml
output_dir = "testPlan"

# Dataset the test plan is generated from
feature_map = "featureMap.yml"
"#;

const EXAMPLE: &str = r#"features:
  - name: Checkout
    tags: [manualUI, automateAPI]
    severity: 5
    for_test: true
    acceptance_criteria:
      - description: Pays with a saved card
        tags: [manualUI, automateAPI]
        status: true
        severity: 4
        complexity: 3
        for_test: true
        test_cases:
          manual: [TC-12]
          automate: [AT-3]
      - description: Shows the receipt after payment
        tags: [manualUI]
        status: TODO
        severity: 3
        complexity: 2
        for_test: true

  - name: Search
    tags: [manualAPI, exploratoryTesting]
    severity: 3
    acceptance_criteria:
      - description: Finds products by name
        tags: [manualAPI]
        status: inProgress
        severity: 3
        complexity: 2
      - description: Tolerates typos
        tags: [exploratoryTesting]
        status: false
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    println!("\n{} Initializing fecov\n", style("📋").bold());

    write_once(&dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
    write_once(&dir.join(EXAMPLE_DATASET), EXAMPLE)?;

    println!("\nNext steps:");
    println!("  {} Report on every dataset", style("fecov report").cyan());
    println!("  {} Print the risk table", style("fecov report --rbt").cyan());
    println!(
        "  {} Build a test plan",
        style(format!("fecov plan -f {}", EXAMPLE_DATASET)).cyan()
    );

    Ok(())
}

/// Write `content` unless the file is already there
fn write_once(path: &Path, content: &str) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if path.exists() {
        println!("{} {} already exists", style("✓").green(), style(&name).cyan());
        return Ok(());
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    println!("{} Created {}", style("✓").green(), style(&name).cyan());
    Ok(())
}

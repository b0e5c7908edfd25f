//! Report command - compute coverage per dataset and write report files

use super::resolve;
use crate::config::load_project_config;
use crate::engine::{analyze, Vocabulary};
use crate::loader::{dataset_name, discover, load_dataset};
use crate::models::{format_rating, Coverage, CoverageReport};
use crate::reporters::{self, file_extension, OutputFormat};
use anyhow::{Context, Result};
use chrono::Utc;
use console::style;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

/// Flags of `fecov report`; unset values fall back to fecov.toml
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub formats: Vec<String>,
    pub rbt: bool,
    pub no_timestamp: bool,
    pub fail_under: Option<u32>,
}

/// Outcome of one successfully processed dataset
struct DatasetOutcome {
    name: String,
    report: CoverageReport,
    written: Vec<PathBuf>,
}

/// Run the report command
pub fn run(dir: &Path, opts: ReportOptions) -> Result<()> {
    let config = load_project_config(dir);
    let vocabulary = config.coverage.vocabulary()?;
    let suffix = config.discovery.suffix.as_str();

    let datasets: Vec<PathBuf> = if opts.files.is_empty() {
        discover(dir, suffix)?
    } else {
        opts.files.iter().map(|f| resolve(dir, f)).collect()
    };
    if datasets.is_empty() {
        anyhow::bail!(
            "No datasets found in {} (looking for *{}). Run `fecov init` for an example.",
            dir.display(),
            suffix
        );
    }

    let clashes = duplicate_names(&datasets, suffix);
    if !clashes.is_empty() {
        anyhow::bail!(
            "Datasets would write to the same report files: {}. Rename one of each pair.",
            clashes.join("; ")
        );
    }

    let format_names = if opts.formats.is_empty() {
        &config.report.formats
    } else {
        &opts.formats
    };
    let formats = parse_formats(format_names)?;

    let output_dir = resolve(
        dir,
        opts.output_dir.as_deref().unwrap_or(config.report.output_dir.as_path()),
    );
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let timestamp = (config.report.timestamp && !opts.no_timestamp)
        .then(|| Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string());
    let fail_under = opts.fail_under.or(config.report.fail_under);

    info!(
        "Processing {} datasets into {}",
        datasets.len(),
        output_dir.display()
    );

    let mut outcomes = Vec::new();
    let mut failed = 0usize;
    for path in &datasets {
        match process_dataset(
            path,
            suffix,
            &vocabulary,
            &formats,
            &output_dir,
            timestamp.as_deref(),
        ) {
            Ok(outcome) => {
                if opts.rbt {
                    print_rbt(&outcome);
                } else {
                    print_summary(&outcome);
                }
                outcomes.push(outcome);
            }
            Err(e) => {
                error!("Dataset {} failed: {:#}", path.display(), e);
                eprintln!(
                    "{} {}: {:#}",
                    style("✗").red().bold(),
                    style(path.display()).cyan(),
                    e
                );
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} datasets failed", failed, datasets.len());
    }

    if let Some(threshold) = fail_under {
        check_fail_under(threshold, &outcomes)?;
    }

    Ok(())
}

fn parse_formats(names: &[String]) -> Result<Vec<OutputFormat>> {
    let mut formats = Vec::new();
    for name in names {
        let format = OutputFormat::from_str(name)?;
        if !formats.contains(&format) {
            formats.push(format);
        }
    }
    Ok(formats)
}

/// Datasets sharing a report name, as `name (path, path)` entries
fn duplicate_names(datasets: &[PathBuf], suffix: &str) -> Vec<String> {
    let mut by_name: BTreeMap<String, Vec<&Path>> = BTreeMap::new();
    for path in datasets {
        by_name
            .entry(dataset_name(path, suffix))
            .or_default()
            .push(path.as_path());
    }
    by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| {
            let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
            format!("{} ({})", name, paths.join(", "))
        })
        .collect()
}

/// Load, analyze and write every format for one dataset
fn process_dataset(
    path: &Path,
    suffix: &str,
    vocabulary: &Vocabulary,
    formats: &[OutputFormat],
    output_dir: &Path,
    timestamp: Option<&str>,
) -> Result<DatasetOutcome> {
    let mut dataset = load_dataset(path, suffix)?;
    let report = analyze(&mut dataset.features, vocabulary);

    let mut rendered = Vec::with_capacity(formats.len());
    for &format in formats {
        let content = reporters::report_with_format(&dataset.features, &report, format)?;
        let file = output_dir.join(report_file_name(
            &dataset.name,
            timestamp,
            file_extension(format),
        ));
        rendered.push((format, file, content));
    }

    let mut written = Vec::new();
    for (format, file, content) in rendered {
        if let Err(e) = std::fs::write(&file, content) {
            remove_partial(&written);
            return Err(e).with_context(|| format!("Failed to write {}", file.display()));
        }
        info!("Wrote {} report to {}", format, file.display());
        written.push(file);
    }

    Ok(DatasetOutcome {
        name: dataset.name,
        report,
        written,
    })
}

/// Drop the files of a dataset whose later formats failed
fn remove_partial(files: &[PathBuf]) {
    for file in files {
        if let Err(e) = std::fs::remove_file(file) {
            warn!("Failed to remove partial report {}: {}", file.display(), e);
        }
    }
}

/// `{dataset}_coverage_report[_{timestamp}].{ext}`
pub fn report_file_name(dataset: &str, timestamp: Option<&str>, extension: &str) -> String {
    match timestamp {
        Some(ts) => format!("{}_coverage_report_{}.{}", dataset, ts, extension),
        None => format!("{}_coverage_report.{}", dataset, extension),
    }
}

/// Datasets whose overall coverage is below `threshold`; NA counts as 0
fn below_threshold(threshold: u32, outcomes: &[DatasetOutcome]) -> Vec<&DatasetOutcome> {
    outcomes
        .iter()
        .filter(|o| o.report.overall_coverage.percent().unwrap_or(0) < threshold)
        .collect()
}

fn check_fail_under(threshold: u32, outcomes: &[DatasetOutcome]) -> Result<()> {
    let below = below_threshold(threshold, outcomes);
    if below.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = below.iter().map(|o| o.name.as_str()).collect();
    anyhow::bail!(
        "Failing due to --fail-under={}: {} below threshold",
        threshold,
        names.join(", ")
    )
}

fn styled_coverage(coverage: Coverage) -> String {
    match coverage {
        Coverage::Percent(p) if p >= 80 => style(coverage).green().to_string(),
        Coverage::Percent(p) if p >= 50 => style(coverage).yellow().to_string(),
        Coverage::Percent(_) => style(coverage).red().to_string(),
        Coverage::NotApplicable => style(coverage).dim().to_string(),
    }
}

fn print_summary(outcome: &DatasetOutcome) {
    let report = &outcome.report;
    println!(
        "\n{} {}  overall coverage {}",
        style("📊").bold(),
        style(&outcome.name).bold(),
        styled_coverage(report.overall_coverage)
    );

    for f in &report.features {
        let cells: Vec<String> = f
            .coverage
            .iter()
            .filter(|(_, c)| c.is_applicable())
            .map(|(tag, c)| format!("{} {}", tag, styled_coverage(*c)))
            .collect();
        println!(
            "  {:<32} {}  {}",
            f.name,
            styled_coverage(f.summary_coverage),
            style(cells.join(", ")).dim()
        );
    }

    let tags: Vec<String> = report
        .total_coverage
        .iter()
        .map(|(tag, pct)| {
            let tally = report.tag_totals.get(tag).copied().unwrap_or_default();
            format!("{} {}% ({}/{})", tag, pct, tally.covered, tally.total)
        })
        .collect();
    println!("  {} {}", style("Per tag:").bold(), tags.join(" | "));

    for file in &outcome.written {
        println!("  {} {}", style("✓").green(), style(file.display()).cyan());
    }
}

fn print_rbt(outcome: &DatasetOutcome) {
    println!(
        "\n{} {}",
        style("RBT - Severity & Risk per feature:").bold(),
        style(&outcome.name).cyan()
    );
    println!("  {:<32} {:>8} {:>8}", "Feature", "Severity", "Risk");
    for f in &outcome.report.features {
        println!(
            "  {:<32} {:>8} {:>8}",
            f.name,
            format_rating(f.severity),
            format_rating(f.risk)
        );
    }
}

//! CLI command definitions and handlers

mod init;
mod plan;
pub(crate) mod report;
mod run_report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use report::ReportOptions;

/// fecov - feature coverage & risk reporting
#[derive(Parser, Debug)]
#[command(name = "fecov")]
#[command(
    version,
    about = "Feature coverage & risk reporting: per-modality test coverage, risk-based testing tables and manual test plans",
    long_about = "fecov reads YAML feature maps (features, acceptance criteria, test modality tags, \
verification status, severity and complexity) and reports how much of each feature is verified \
per test modality, ranked by severity with derived risk scores.\n\n\
Run without a subcommand to report on every *.fecov.yml dataset in the current directory:\n  \
fecov",
    after_help = "\
Examples:
  fecov                                   Report on all datasets in the current directory
  fecov report -f checkout.fecov.yml      Report on one dataset
  fecov report --format json --format md  Write JSON and Markdown reports
  fecov report --rbt                      Print only the risk-based testing table
  fecov report --fail-under 80            Exit code 1 if any dataset is below 80% (CI mode)
  fecov plan -f featureMap.yml            Write a test plan checklist and run results file
  fecov run-report                        Summarize a filled-in testRunResults.yml
  fecov init                              Write fecov.toml and an example dataset"
)]
pub struct Cli {
    /// Working directory (datasets, fecov.toml and relative paths resolve here)
    #[arg(long, short = 'C', global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute coverage and risk for datasets and write reports
    #[command(after_help = "\
Examples:
  fecov report                                 All *.fecov.yml files in the working directory
  fecov report -f a.fecov.yml -f b.fecov.yml   Explicit datasets
  fecov report -o out --format html            HTML only, into ./out
  fecov report --no-timestamp                  Stable file names (overwrites previous reports)
  fecov report --fail-under 80                 Exit code 1 if any dataset is below 80%")]
    Report {
        /// Dataset file (repeatable; default: discover by suffix)
        #[arg(long = "file", short = 'f')]
        files: Vec<PathBuf>,

        /// Output directory (default: reports, or [report] output_dir)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Report format: text, json, html, markdown (or md); repeatable
        #[arg(long = "format", value_parser = ["text", "txt", "json", "html", "markdown", "md"])]
        formats: Vec<String>,

        /// Print only the risk-based testing table to the terminal
        #[arg(long)]
        rbt: bool,

        /// Do not append a timestamp to report file names
        #[arg(long)]
        no_timestamp: bool,

        /// Exit with code 1 if any dataset's overall coverage is below this percentage
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        fail_under: Option<u32>,
    },

    /// Write a test plan checklist and an empty test run results file
    #[command(after_help = "\
Examples:
  fecov plan                          Plan from featureMap.yml into ./testPlan
  fecov plan -f checkout.fecov.yml    Plan from another dataset
  fecov plan --force                  Replace an existing testRunResults.yml")]
    Plan {
        /// Dataset file (default: featureMap.yml, or [plan] feature_map)
        #[arg(long = "file", short = 'f')]
        file: Option<PathBuf>,

        /// Output directory (default: testPlan, or [plan] output_dir)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Overwrite an existing testRunResults.yml
        #[arg(long)]
        force: bool,
    },

    /// Summarize a filled-in test run results file
    RunReport {
        /// Test run results file (default: <plan dir>/testRunResults.yml)
        #[arg(long, short = 'r')]
        results: Option<PathBuf>,

        /// Output directory (default: testPlan, or [plan] output_dir)
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,
    },

    /// Write a commented fecov.toml and an example dataset
    Init,
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Init) => init::run(&cli.dir),

        Some(Commands::Report {
            files,
            output_dir,
            formats,
            rbt,
            no_timestamp,
            fail_under,
        }) => report::run(
            &cli.dir,
            ReportOptions {
                files,
                output_dir,
                formats,
                rbt,
                no_timestamp,
                fail_under,
            },
        ),

        Some(Commands::Plan {
            file,
            output_dir,
            force,
        }) => plan::run(&cli.dir, file, output_dir, force),

        Some(Commands::RunReport {
            results,
            output_dir,
        }) => run_report::run(&cli.dir, results, output_dir),

        None => report::run(&cli.dir, ReportOptions::default()),
    }
}

/// Resolve a user path against the working directory
pub(crate) fn resolve(dir: &std::path::Path, path: &std::path::Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["fecov"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.dir, PathBuf::from("."));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_report_flags() {
        let cli = Cli::try_parse_from([
            "fecov", "-C", "work", "report", "-f", "a.fecov.yml", "-f", "b.fecov.yml",
            "--format", "json", "--format", "md", "--rbt", "--fail-under", "80",
        ])
        .unwrap();
        assert_eq!(cli.dir, PathBuf::from("work"));
        match cli.command {
            Some(Commands::Report {
                files,
                formats,
                rbt,
                fail_under,
                ..
            }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(formats, vec!["json", "md"]);
                assert!(rbt);
                assert_eq!(fail_under, Some(80));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fail_under_is_a_percentage() {
        assert!(Cli::try_parse_from(["fecov", "report", "--fail-under", "101"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["fecov", "report", "--format", "sarif"]).is_err());
    }

    #[test]
    fn test_resolve() {
        let dir = std::path::Path::new("/work");
        assert_eq!(resolve(dir, std::path::Path::new("a.yml")), PathBuf::from("/work/a.yml"));
        assert_eq!(resolve(dir, std::path::Path::new("/abs/a.yml")), PathBuf::from("/abs/a.yml"));
    }
}

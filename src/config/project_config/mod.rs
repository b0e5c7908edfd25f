//! Project-level configuration support
//!
//! Loads `fecov.toml` from the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # fecov.toml
//!
//! [coverage]
//! tags = ["manualUI", "manualAPI", "automateUI", "automateAPI", "exploratoryTesting"]
//!
//! [report]
//! output_dir = "reports"
//! formats = ["html", "text"]
//! timestamp = true
//! fail_under = 80
//!
//! [discovery]
//! suffix = ".fecov.yml"
//!
//! [plan]
//! output_dir = "testPlan"
//! feature_map = "featureMap.yml"
//! ```
//!
//! Every key is optional. Command-line flags take precedence over the file.

use crate::engine::{UnknownModality, Vocabulary};
use crate::loader::DEFAULT_SUFFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "fecov.toml";

/// Errors in configuration values that cannot fall back to defaults
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid [coverage] tags in fecov.toml: {0}")]
    UnknownTag(#[from] UnknownModality),
}

/// Project-level configuration loaded from fecov.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub coverage: CoverageConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

/// Which modality columns to aggregate
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CoverageConfig {
    /// Modality vocabulary (default: all five tags)
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CoverageConfig {
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        match &self.tags {
            Some(labels) => Ok(Vocabulary::from_labels(labels)?),
            None => Ok(Vocabulary::default()),
        }
    }
}

/// Defaults for `fecov report`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory reports are written to (default: reports)
    #[serde(default = "default_report_dir")]
    pub output_dir: PathBuf,

    /// Formats written per dataset (default: html, text)
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Append a timestamp to report file names (default: true)
    #[serde(default = "default_true")]
    pub timestamp: bool,

    /// Fail when a dataset's overall coverage is below this percentage
    #[serde(default)]
    pub fail_under: Option<u32>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_report_dir(),
            formats: default_formats(),
            timestamp: true,
            fail_under: None,
        }
    }
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_formats() -> Vec<String> {
    vec!["html".to_string(), "text".to_string()]
}

fn default_true() -> bool {
    true
}

/// How datasets are found
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// File name suffix of dataset files (default: .fecov.yml)
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

/// Defaults for `fecov plan` and `fecov run-report`
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Directory for checklists and test run files (default: testPlan)
    #[serde(default = "default_plan_dir")]
    pub output_dir: PathBuf,

    /// Dataset the plan is generated from (default: featureMap.yml)
    #[serde(default = "default_feature_map")]
    pub feature_map: PathBuf,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            output_dir: default_plan_dir(),
            feature_map: default_feature_map(),
        }
    }
}

fn default_plan_dir() -> PathBuf {
    PathBuf::from("testPlan")
}

fn default_feature_map() -> PathBuf {
    PathBuf::from("featureMap.yml")
}

/// Load project configuration from `dir`.
///
/// Returns defaults when the file is missing or cannot be parsed.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
        return ProjectConfig::default();
    }
    match load_toml_config(&path) {
        Ok(config) => {
            debug!("Loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            ProjectConfig::default()
        }
    }
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

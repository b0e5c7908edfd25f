//! Configuration module for fecov
//!
//! This module handles:
//! - Project-level configuration (fecov.toml)
//! - Modality vocabulary selection
//! - Report, discovery and test plan defaults

mod project_config;

pub use project_config::{
    ConfigError,
    CoverageConfig,
    DiscoveryConfig,
    PlanConfig,
    ProjectConfig,
    ReportConfig,
    CONFIG_FILE,
    load_project_config,
};

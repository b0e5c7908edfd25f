//! fecov - feature coverage & risk reporting
//!
//! Reads YAML feature maps, computes per-modality coverage and derived risk
//! for each feature, and renders reports and manual test plans.
//!
//! - [`loader`] - dataset parsing and discovery
//! - [`engine`] - ranking, risk scoring and coverage aggregation
//! - [`reporters`] - text, JSON, HTML and Markdown projections
//! - [`testplan`] - checklists and test run reports
//! - [`config`] - `fecov.toml`

pub mod cli;
pub mod config;
pub mod engine;
pub mod loader;
pub mod models;
pub mod reporters;
pub mod testplan;

//! Manual test plan toolkit
//!
//! - [`checklist`] - printable checklist of the features marked `for_test`
//! - [`run`] - test run results file: skeleton export, loading and report

pub mod checklist;
pub mod run;

pub use run::{RunSummary, TestRun};

/// File name of the run results skeleton written next to the checklist
pub const RUN_RESULTS_FILE: &str = "testRunResults.yml";

/// File stem of the rendered run report
pub const RUN_REPORT_STEM: &str = "testRunReport";

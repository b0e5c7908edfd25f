//! Core data models for fecov
//!
//! Two families of types live here:
//! - the feature dataset as read from `*.fecov.yml` files
//!   ([`FeatureSet`], [`Feature`], [`AcceptanceCriterion`])
//! - the aggregation result handed to reporters ([`CoverageReport`])

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Testing modality a criterion or feature can be tagged with
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ModalityTag {
    #[serde(rename = "manualUI")]
    ManualUi,
    #[serde(rename = "manualAPI")]
    ManualApi,
    #[serde(rename = "automateUI")]
    AutomateUi,
    #[serde(rename = "automateAPI")]
    AutomateApi,
    #[serde(rename = "exploratoryTesting")]
    ExploratoryTesting,
}

impl ModalityTag {
    /// The full modality vocabulary, in column order
    pub const ALL: [ModalityTag; 5] = [
        ModalityTag::ManualUi,
        ModalityTag::ManualApi,
        ModalityTag::AutomateUi,
        ModalityTag::AutomateApi,
        ModalityTag::ExploratoryTesting,
    ];

    /// Label as written in datasets
    pub fn label(&self) -> &'static str {
        match self {
            ModalityTag::ManualUi => "manualUI",
            ModalityTag::ManualApi => "manualAPI",
            ModalityTag::AutomateUi => "automateUI",
            ModalityTag::AutomateApi => "automateAPI",
            ModalityTag::ExploratoryTesting => "exploratoryTesting",
        }
    }

    /// Parse a dataset label. Matching is exact; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        ModalityTag::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for ModalityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verification state of an acceptance criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CriterionStatus {
    Verified,
    #[default]
    NotVerified,
    InProgress,
    Todo,
}

impl CriterionStatus {
    /// Map a textual status. Anything unrecognized is `NotVerified`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "true" | "verified" => CriterionStatus::Verified,
            "inprogress" | "in_progress" | "in progress" => CriterionStatus::InProgress,
            "todo" => CriterionStatus::Todo,
            _ => CriterionStatus::NotVerified,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, CriterionStatus::Verified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionStatus::Verified => "Verified",
            CriterionStatus::NotVerified => "NotVerified",
            CriterionStatus::InProgress => "InProgress",
            CriterionStatus::Todo => "TODO",
        }
    }
}

impl fmt::Display for CriterionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CriterionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct StatusVisitor;

impl<'de> Visitor<'de> for StatusVisitor {
    type Value = CriterionStatus;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean or a status label")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(if v {
            CriterionStatus::Verified
        } else {
            CriterionStatus::NotVerified
        })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(CriterionStatus::from_label(v))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(CriterionStatus::NotVerified)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(CriterionStatus::NotVerified)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(CriterionStatus::NotVerified)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CriterionStatus::NotVerified)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CriterionStatus::NotVerified)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(StatusVisitor)
    }
}

impl<'de> Deserialize<'de> for CriterionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StatusVisitor)
    }
}

/// Accept any YAML scalar for a rating; only finite numbers count.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rating {
        Number(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Rating>::deserialize(deserializer)? {
        Some(Rating::Number(v)) if v.is_finite() => Some(v),
        _ => None,
    })
}

/// Test case identifiers attached to a criterion (opaque, pass-through)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCases {
    #[serde(default)]
    pub manual: Vec<String>,
    #[serde(default)]
    pub automate: Vec<String>,
}

/// A single verifiable statement belonging to a feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceCriterion {
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: CriterionStatus,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub severity: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub complexity: Option<f64>,
    /// Derived by the risk scorer; never read from input
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<TestCases>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl AcceptanceCriterion {
    pub fn has_tag(&self, tag: ModalityTag) -> bool {
        self.tags.iter().any(|t| t == tag.label())
    }

    pub fn is_for_test(&self) -> bool {
        self.for_test.unwrap_or(false)
    }
}

/// A testable unit of product behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub severity: Option<f64>,
    /// Derived by the risk scorer; never read from input
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_test: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CriterionStatus>,
    pub acceptance_criteria: Vec<AcceptanceCriterion>,
}

impl Feature {
    /// Whether a modality column applies to this feature
    pub fn declares(&self, tag: ModalityTag) -> bool {
        self.tags.iter().any(|t| t == tag.label())
    }

    pub fn is_for_test(&self) -> bool {
        self.for_test.unwrap_or(false)
    }
}

/// Manual and automated test case ids of `criteria`, in order
pub fn test_case_ids(criteria: &[AcceptanceCriterion]) -> (Vec<&str>, Vec<&str>) {
    let mut manual = Vec::new();
    let mut automate = Vec::new();
    for cases in criteria.iter().filter_map(|ac| ac.test_cases.as_ref()) {
        manual.extend(cases.manual.iter().map(String::as_str));
        automate.extend(cases.automate.iter().map(String::as_str));
    }
    (manual, automate)
}

/// The whole dataset read from one input document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub features: Vec<Feature>,
}

/// Coverage figure that may not apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    Percent(u32),
    NotApplicable,
}

impl Coverage {
    pub fn percent(&self) -> Option<u32> {
        match self {
            Coverage::Percent(p) => Some(*p),
            Coverage::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Coverage::Percent(_))
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coverage::Percent(p) => write!(f, "{}%", p),
            Coverage::NotApplicable => f.write_str("NA"),
        }
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Coverage::Percent(p) => serializer.serialize_u32(*p),
            Coverage::NotApplicable => serializer.serialize_str("NA"),
        }
    }
}

/// Raw per-tag counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagTally {
    pub total: usize,
    pub covered: usize,
}

/// Coverage and risk of one feature, in ranked order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCoverage {
    pub name: String,
    pub tags: Vec<String>,
    pub coverage: BTreeMap<ModalityTag, Coverage>,
    pub summary_coverage: Coverage,
    pub severity: Option<f64>,
    pub risk: Option<f64>,
    pub acceptance_criteria: Vec<AcceptanceCriterion>,
}

/// Result of one aggregation pass over a [`FeatureSet`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub features: Vec<FeatureCoverage>,
    pub total_coverage: BTreeMap<ModalityTag, u32>,
    pub tag_totals: BTreeMap<ModalityTag, TagTally>,
    pub overall_coverage: Coverage,
}

/// Format an optional rating the way every report does (`-` when absent)
pub fn format_rating(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

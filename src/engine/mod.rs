//! Coverage and risk aggregation engine
//!
//! One pass over a [`FeatureSet`]:
//!
//! ```text
//! rank features (severity desc, stable)
//!   └─ for each feature:
//!        score risks        → criterion.risk, feature.risk
//!        tally vocabulary   → {total, covered} per tag
//!        per-tag coverage   → NA | 0 | round(covered / total * 100)
//!        summary coverage   → mean over declared tags
//!        fold into global tallies
//! overall coverage = mean of applicable feature summaries
//! ```
//!
//! The engine never fails. Missing ratings, unknown tags and unknown
//! statuses all resolve to defined fallbacks. The only mutation is the
//! derived `risk` fields of the input set, which are recomputed each run.

pub mod coverage;
pub mod ranking;
pub mod risk;
pub mod rounding;

use crate::models::{CoverageReport, FeatureCoverage, FeatureSet, ModalityTag};
use coverage::GlobalTally;
use thiserror::Error;

/// Unknown label while building a [`Vocabulary`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown modality tag '{0}'. Valid tags: manualUI, manualAPI, automateUI, automateAPI, exploratoryTesting")]
pub struct UnknownModality(pub String);

/// The modality tags an aggregation run reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tags: Vec<ModalityTag>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            tags: ModalityTag::ALL.to_vec(),
        }
    }
}

impl Vocabulary {
    /// Build from tags, dropping duplicates and keeping canonical column order
    pub fn new(tags: impl IntoIterator<Item = ModalityTag>) -> Self {
        let mut tags: Vec<ModalityTag> = tags.into_iter().collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    /// Parse dataset-style labels (`manualUI`, ...)
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, UnknownModality> {
        let tags = labels
            .iter()
            .map(|l| {
                ModalityTag::from_label(l.as_ref())
                    .ok_or_else(|| UnknownModality(l.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tags))
    }

    pub fn iter(&self) -> impl Iterator<Item = ModalityTag> + '_ {
        self.tags.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Run the aggregation over a feature set.
///
/// Writes the derived `risk` fields into `set` and returns the ranked
/// coverage report. Calling it again on the same set gives the same result.
pub fn analyze(set: &mut FeatureSet, vocabulary: &Vocabulary) -> CoverageReport {
    risk::score(set);

    let mut global = GlobalTally::new(vocabulary);
    let mut features = Vec::with_capacity(set.features.len());

    for feature in ranking::ranked(&set.features) {
        let tallies = coverage::tally_feature(feature, vocabulary);
        let per_tag = tallies
            .iter()
            .map(|(tag, tally)| (*tag, coverage::tag_coverage(feature, *tag, *tally)))
            .collect();
        let summary = coverage::summary_coverage(feature, &tallies);
        global.absorb(&tallies);

        features.push(FeatureCoverage {
            name: feature.name.clone(),
            tags: feature.tags.clone(),
            coverage: per_tag,
            summary_coverage: summary,
            severity: feature.severity,
            risk: feature.risk,
            acceptance_criteria: feature.acceptance_criteria.clone(),
        });
    }

    let overall_coverage = coverage::overall_coverage(features.iter().map(|f| &f.summary_coverage));
    tracing::debug!(
        "Aggregated {} features over {} tags (overall {})",
        features.len(),
        vocabulary.len(),
        overall_coverage
    );

    CoverageReport {
        total_coverage: global.percentages(),
        tag_totals: global.into_tallies(),
        overall_coverage,
        features,
    }
}

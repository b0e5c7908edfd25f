//! Coverage aggregation
//!
//! Per feature, every vocabulary tag gets a `{total, covered}` tally over
//! the criteria carrying it. A tag only shows up as a feature-level
//! percentage when the feature itself declares it; the global tallies count
//! every tagged criterion regardless.

use super::rounding::{mean_percent, round_percent};
use super::Vocabulary;
use crate::models::{AcceptanceCriterion, Coverage, Feature, ModalityTag, TagTally};
use std::collections::BTreeMap;

impl TagTally {
    /// Count one criterion carrying the tag
    pub fn record(&mut self, criterion: &AcceptanceCriterion) {
        self.total += 1;
        if criterion.status.is_verified() {
            self.covered += 1;
        }
    }

    pub fn merge(&mut self, other: TagTally) {
        self.total += other.total;
        self.covered += other.covered;
    }

    /// Covered fraction, `0.0` when nothing carries the tag
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.covered as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> u32 {
        round_percent(self.ratio())
    }
}

/// Tally every vocabulary tag over one feature's criteria
pub fn tally_feature(feature: &Feature, vocabulary: &Vocabulary) -> BTreeMap<ModalityTag, TagTally> {
    let mut tallies: BTreeMap<ModalityTag, TagTally> =
        vocabulary.iter().map(|tag| (tag, TagTally::default())).collect();
    for ac in &feature.acceptance_criteria {
        for (tag, tally) in tallies.iter_mut() {
            if ac.has_tag(*tag) {
                tally.record(ac);
            }
        }
    }
    tallies
}

/// Feature-level percentage for one tag
pub fn tag_coverage(feature: &Feature, tag: ModalityTag, tally: TagTally) -> Coverage {
    if feature.declares(tag) {
        Coverage::Percent(tally.percent())
    } else {
        Coverage::NotApplicable
    }
}

/// Mean coverage over the tags the feature declares.
///
/// Uses the unrounded per-tag ratios; an applicable tag with no criteria
/// contributes zero.
pub fn summary_coverage(feature: &Feature, tallies: &BTreeMap<ModalityTag, TagTally>) -> Coverage {
    let ratios: Vec<f64> = tallies
        .iter()
        .filter(|(tag, _)| feature.declares(**tag))
        .map(|(_, tally)| tally.ratio())
        .collect();
    if ratios.is_empty() {
        return Coverage::NotApplicable;
    }
    Coverage::Percent(round_percent(ratios.iter().sum::<f64>() / ratios.len() as f64))
}

/// Mean of feature summaries, ignoring those that are not applicable
pub fn overall_coverage<'a, I>(summaries: I) -> Coverage
where
    I: IntoIterator<Item = &'a Coverage>,
{
    let values: Vec<u32> = summaries.into_iter().filter_map(Coverage::percent).collect();
    match mean_percent(&values) {
        Some(p) => Coverage::Percent(p),
        None => Coverage::NotApplicable,
    }
}

/// Project-wide per-tag tallies
#[derive(Debug, Clone, Default)]
pub struct GlobalTally {
    tallies: BTreeMap<ModalityTag, TagTally>,
}

impl GlobalTally {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            tallies: vocabulary.iter().map(|tag| (tag, TagTally::default())).collect(),
        }
    }

    /// Fold one feature's tallies in, applicable or not
    pub fn absorb(&mut self, feature_tallies: &BTreeMap<ModalityTag, TagTally>) {
        for (tag, tally) in feature_tallies {
            self.tallies.entry(*tag).or_default().merge(*tally);
        }
    }

    pub fn percentages(&self) -> BTreeMap<ModalityTag, u32> {
        self.tallies
            .iter()
            .map(|(tag, tally)| (*tag, tally.percent()))
            .collect()
    }

    pub fn into_tallies(self) -> BTreeMap<ModalityTag, TagTally> {
        self.tallies
    }
}

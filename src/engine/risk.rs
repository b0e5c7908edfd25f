//! Risk scoring
//!
//! ```text
//! criterion risk = round2((feature.severity + criterion.severity + criterion.complexity) / 3)
//! feature risk   = round2(mean of the defined criterion risks)
//! ```
//!
//! A risk is only defined when every input is rated. Unrated criteria are
//! left out of the feature mean rather than counted as zero.

use super::rounding::round2;
use crate::models::{AcceptanceCriterion, Feature, FeatureSet};

/// Risk of one criterion under a feature of the given severity
pub fn criterion_risk(feature_severity: Option<f64>, criterion: &AcceptanceCriterion) -> Option<f64> {
    let (fs, cs, cx) = (feature_severity?, criterion.severity?, criterion.complexity?);
    Some(round2((fs + cs + cx) / 3.0))
}

/// Mean of the defined risks, `None` when there are none
pub fn feature_risk<I>(criterion_risks: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let defined: Vec<f64> = criterion_risks.into_iter().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    Some(round2(defined.iter().sum::<f64>() / defined.len() as f64))
}

/// Recompute and store the derived risk of a feature and its criteria
pub fn score_feature(feature: &mut Feature) {
    let severity = feature.severity;
    for ac in &mut feature.acceptance_criteria {
        ac.risk = criterion_risk(severity, ac);
    }
    feature.risk = feature_risk(feature.acceptance_criteria.iter().map(|ac| ac.risk));
}

/// Recompute every derived risk field in the set
pub fn score(set: &mut FeatureSet) {
    for feature in &mut set.features {
        score_feature(feature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(severity: Option<f64>, complexity: Option<f64>) -> AcceptanceCriterion {
        AcceptanceCriterion {
            description: "ac".into(),
            severity,
            complexity,
            ..Default::default()
        }
    }

    #[test]
    fn test_criterion_risk_defined() {
        assert_eq!(criterion_risk(Some(4.0), &criterion(Some(2.0), Some(3.0))), Some(3.0));
        assert_eq!(criterion_risk(Some(1.0), &criterion(Some(1.0), Some(2.0))), Some(1.33));
    }

    #[test]
    fn test_criterion_risk_missing_input() {
        assert_eq!(criterion_risk(Some(4.0), &criterion(Some(2.0), None)), None);
        assert_eq!(criterion_risk(Some(4.0), &criterion(None, Some(3.0))), None);
        assert_eq!(criterion_risk(None, &criterion(Some(2.0), Some(3.0))), None);
    }

    #[test]
    fn test_feature_risk_mean_of_defined() {
        assert_eq!(feature_risk([Some(3.0), Some(5.0)]), Some(4.0));
        assert_eq!(feature_risk([Some(3.0), None, Some(5.0)]), Some(4.0));
        assert_eq!(feature_risk([None, None]), None);
        assert_eq!(feature_risk(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn test_score_overwrites_stale_values() {
        let mut feature = Feature {
            name: "f".into(),
            severity: Some(4.0),
            risk: Some(99.0),
            acceptance_criteria: vec![
                AcceptanceCriterion {
                    risk: Some(42.0),
                    ..criterion(Some(2.0), None)
                },
                criterion(Some(2.0), Some(3.0)),
            ],
            ..Default::default()
        };
        score_feature(&mut feature);
        assert_eq!(feature.acceptance_criteria[0].risk, None);
        assert_eq!(feature.acceptance_criteria[1].risk, Some(3.0));
        assert_eq!(feature.risk, Some(3.0));
    }
}

//! Feature ranking: stable, descending by severity.

use crate::models::Feature;
use std::cmp::Ordering;

/// Severity used for ordering; unrated features sort as `0`
fn rank_key(feature: &Feature) -> f64 {
    feature.severity.unwrap_or(0.0)
}

/// Indices of `features` ordered by descending severity.
///
/// Equal severities keep their input order.
pub fn rank(features: &[Feature]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..features.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| {
        rank_key(&features[b])
            .partial_cmp(&rank_key(&features[a]))
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Features in ranked order
pub fn ranked(features: &[Feature]) -> Vec<&Feature> {
    rank(features).into_iter().map(|i| &features[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(name: &str, severity: Option<f64>) -> Feature {
        Feature {
            name: name.into(),
            severity,
            ..Default::default()
        }
    }

    #[test]
    fn test_stable_descending_with_unrated_as_zero() {
        let features = vec![
            feature("A", Some(3.0)),
            feature("B", None),
            feature("C", Some(5.0)),
            feature("D", Some(5.0)),
        ];
        let names: Vec<&str> = ranked(&features).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D", "A", "B"]);
    }

    #[test]
    fn test_unrated_ties_with_explicit_zero() {
        let features = vec![feature("X", None), feature("Y", Some(0.0)), feature("Z", None)];
        assert_eq!(rank(&features), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(&[]).is_empty());
    }
}

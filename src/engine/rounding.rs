//! Rounding rule shared by every derived figure.
//!
//! All values round to nearest with ties away from zero (`f64::round`).
//! Percentages are never negative, so this is "half up" in practice.

/// Round to two decimal places (risk values)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turn a ratio in `[0, 1]` into a whole percentage
pub fn round_percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}

/// Whole-number mean of whole percentages
pub fn mean_percent(values: &[u32]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some((sum as f64 / values.len() as f64).round() as u32)
}

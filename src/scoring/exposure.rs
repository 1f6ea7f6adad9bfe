//! Asset-weighted exposure: the base score scaled by linked asset criticality.

use crate::core::{Criticality, Rating};

/// Multiplicative weight of an asset's criticality.
pub fn criticality_factor(criticality: Criticality) -> f64 {
    match criticality {
        Criticality::Low => 0.8,
        Criticality::Medium => 1.0,
        Criticality::High => 1.25,
        Criticality::Critical => 1.5,
    }
}

/// Asset-weighted exposure: base score times the mean criticality factor
/// of the linked assets, rounded to two decimals.
///
/// With no linked assets the factor is 1.0 and the exposure equals the
/// base score. The severity tier is never derived from this value.
pub fn exposure_score(impact: Rating, probability: Rating, linked: &[Criticality]) -> f64 {
    let base = f64::from(impact.get() * probability.get());
    if linked.is_empty() {
        return base;
    }

    let total: f64 = linked.iter().copied().map(criticality_factor).sum();
    let mean = total / linked.len() as f64;
    round2(base * mean)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

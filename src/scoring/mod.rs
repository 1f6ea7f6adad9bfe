//! Severity scoring for risks.
//!
//! A risk's score is `impact * probability` and its tier comes from a fixed,
//! ordered threshold table (highest first, first match wins). Every other
//! module that needs a tier (matrix cell colouring, ranking display,
//! summary counts) goes through [`SeverityTier::from_score`] so the
//! thresholds live in exactly one place.

pub mod exposure;

use crate::core::{Asset, Rating, Risk};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use exposure::{criticality_factor, exposure_score};

/// Severity tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
    Critical,
}

/// Tier thresholds, highest first. Scores below the last entry are `Low`.
pub const TIER_THRESHOLDS: [(u8, SeverityTier); 3] = [
    (20, SeverityTier::Critical),
    (15, SeverityTier::High),
    (10, SeverityTier::Medium),
];

impl SeverityTier {
    /// All tiers, most severe first.
    pub const ALL: [SeverityTier; 4] = [
        SeverityTier::Critical,
        SeverityTier::High,
        SeverityTier::Medium,
        SeverityTier::Low,
    ];

    pub fn from_score(score: u8) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, tier)| *tier)
            .unwrap_or(SeverityTier::Low)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Low => "LOW",
            SeverityTier::Medium => "MEDIUM",
            SeverityTier::High => "HIGH",
            SeverityTier::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score and tier for one (impact, probability) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: u8,
    pub tier: SeverityTier,
}

/// Score validated ratings. Infallible because [`Rating`] is always in range.
pub fn score_ratings(impact: Rating, probability: Rating) -> RiskScore {
    let score = impact.get() * probability.get();
    RiskScore {
        score,
        tier: SeverityTier::from_score(score),
    }
}

/// Score raw ratings, failing with `InvalidRating` outside `[1, 5]`.
///
/// ```rust
/// use riskboard::scoring::{score, SeverityTier};
///
/// let result = score(5, 4).unwrap();
/// assert_eq!(result.score, 20);
/// assert_eq!(result.tier, SeverityTier::Critical);
/// assert!(score(0, 3).is_err());
/// ```
pub fn score(impact: i64, probability: i64) -> Result<RiskScore> {
    let impact = Rating::for_field("impact", impact)?;
    let probability = Rating::for_field("probability", probability)?;
    Ok(score_ratings(impact, probability))
}

/// A risk annotated with its score, tier and asset-weighted exposure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRisk {
    #[serde(flatten)]
    pub risk: Risk,
    pub tier: SeverityTier,
    pub exposure: f64,
}

impl ScoredRisk {
    pub fn new(risk: Risk, linked: &[crate::core::Criticality]) -> Self {
        let RiskScore { tier, .. } = score_ratings(risk.impact, risk.probability);
        let exposure = exposure_score(risk.impact, risk.probability, linked);
        Self {
            risk,
            tier,
            exposure,
        }
    }

    pub fn score(&self) -> u8 {
        self.risk.score()
    }
}

/// Annotate every risk with its score and exposure.
///
/// Asset links that do not resolve against `assets` are skipped with a
/// warning; they weigh nothing in the exposure score.
pub fn annotate(risks: &[Risk], assets: &[Asset]) -> Vec<ScoredRisk> {
    let criticality: HashMap<&str, crate::core::Criticality> = assets
        .iter()
        .map(|asset| (asset.id.as_str(), asset.criticality))
        .collect();

    risks
        .iter()
        .map(|risk| {
            let linked: Vec<_> = risk
                .asset_ids
                .iter()
                .filter_map(|id| {
                    let found = criticality.get(id.as_str()).copied();
                    if found.is_none() {
                        tracing::warn!(risk = %risk.id, asset = %id, "linked asset not in snapshot");
                    }
                    found
                })
                .collect();
            ScoredRisk::new(risk.clone(), &linked)
        })
        .collect()
}

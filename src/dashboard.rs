//! Builds every dashboard aggregate from one coherent snapshot.
//!
//! The matrix, ranked list, trend and summary are all computed from the
//! same [`DashboardSnapshot`], so they always agree on the data version.
//! Nothing is cached between builds.

use crate::aggregation::{
    top_scored, RiskMatrix, TimestampedScore, TrendAggregator, TrendPoint,
};
use crate::config::{validation::validate_config_result, RiskboardConfig};
use crate::core::{Asset, Risk, RiskRecord};
use crate::errors::Result;
use crate::gamification::{GamificationEngine, GamificationProfile, ProfileSnapshot};
use crate::scoring::{annotate, ScoredRisk, SeverityTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire shape of a snapshot, before risk records are validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotRecords {
    pub risks: Vec<RiskRecord>,
    pub assets: Vec<Asset>,
    pub history: Vec<TimestampedScore>,
    pub profile: Option<ProfileSnapshot>,
}

/// Immutable point-in-time input for one dashboard build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub risks: Vec<Risk>,
    pub assets: Vec<Asset>,
    pub history: Vec<TimestampedScore>,
    pub profile: Option<ProfileSnapshot>,
}

impl DashboardSnapshot {
    /// Validate every risk record; the first bad record fails the snapshot.
    pub fn from_records(records: SnapshotRecords) -> Result<Self> {
        let risks = records
            .risks
            .into_iter()
            .map(Risk::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            risks,
            assets: records.assets,
            history: records.history,
            profile: records.profile,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let records: SnapshotRecords = serde_json::from_str(json)?;
        Self::from_records(records)
    }
}

/// Headline indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_risks: usize,
    pub unresolved_risks: usize,
    pub mitigated_risks: usize,
    /// Risks scoring 15 or more (HIGH and CRITICAL)
    pub high_or_above: usize,
    pub total_mitigations: usize,
    pub total_assets: usize,
    /// Mean score of unresolved risks, two decimals
    pub global_score: f64,
    pub by_severity: BTreeMap<SeverityTier, usize>,
    /// Unresolved risks whose mitigations are all done
    pub mitigation_candidates: Vec<String>,
}

impl DashboardSummary {
    pub fn from_scored(scored: &[ScoredRisk], total_assets: usize) -> Self {
        let mut by_severity: BTreeMap<SeverityTier, usize> =
            SeverityTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for item in scored {
            *by_severity.entry(item.tier).or_insert(0) += 1;
        }

        let open: Vec<&ScoredRisk> = scored.iter().filter(|s| !s.risk.is_resolved()).collect();
        let global_score = if open.is_empty() {
            0.0
        } else {
            let sum: f64 = open.iter().map(|s| f64::from(s.score())).sum();
            round2(sum / open.len() as f64)
        };

        Self {
            total_risks: scored.len(),
            unresolved_risks: open.len(),
            mitigated_risks: scored.len() - open.len(),
            high_or_above: scored
                .iter()
                .filter(|s| s.tier >= SeverityTier::High)
                .count(),
            total_mitigations: scored.iter().map(|s| s.risk.mitigations.len()).sum(),
            total_assets,
            global_score,
            by_severity,
            mitigation_candidates: open
                .iter()
                .filter(|s| s.risk.all_mitigations_done())
                .map(|s| s.risk.id.clone())
                .collect(),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Everything the dashboard renders, as plain serializable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub matrix: RiskMatrix,
    pub top_risks: Vec<ScoredRisk>,
    pub trend: Vec<TrendPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<GamificationProfile>,
}

/// Configured set of engines. Built once; `build` is pure.
#[derive(Debug, Clone)]
pub struct Dashboard {
    top_n: usize,
    trend: TrendAggregator,
    gamification: GamificationEngine,
}

impl Dashboard {
    pub fn new(config: &RiskboardConfig) -> Result<Self> {
        validate_config_result(config)?;
        Ok(Self {
            top_n: config.ranking.top_n,
            trend: TrendAggregator::new(config.trend),
            gamification: config.gamification.engine()?,
        })
    }

    pub fn gamification(&self) -> &GamificationEngine {
        &self.gamification
    }

    pub fn build(&self, snapshot: &DashboardSnapshot) -> DashboardView {
        let span = tracing::debug_span!("dashboard_build", risks = snapshot.risks.len());
        let _guard = span.enter();

        let scored = annotate(&snapshot.risks, &snapshot.assets);
        let view = DashboardView {
            summary: DashboardSummary::from_scored(&scored, snapshot.assets.len()),
            matrix: RiskMatrix::aggregate(&snapshot.risks),
            top_risks: top_scored(&scored, self.top_n),
            trend: self.trend.trend(&snapshot.history),
            profile: snapshot
                .profile
                .as_ref()
                .map(|profile| self.gamification.derive_profile(profile)),
        };

        tracing::debug!(
            global_score = view.summary.global_score,
            top = view.top_risks.len(),
            trend_points = view.trend.len(),
            "built dashboard"
        );
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CostTier, Mitigation, MitigationStatus, Progress, Rating, RiskStatus};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn risk(id: &str, impact: i64, probability: i64, status: RiskStatus) -> Risk {
        Risk::new(
            id,
            Rating::new(impact).unwrap(),
            Rating::new(probability).unwrap(),
            Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        )
        .with_status(status)
    }

    fn done(id: &str, risk_id: &str) -> Mitigation {
        Mitigation {
            id: id.to_string(),
            risk_id: risk_id.to_string(),
            title: String::new(),
            status: MitigationStatus::Done,
            progress: Progress::new(100).unwrap(),
            cost: CostTier::default(),
            duration_days: 2,
            assignee: None,
            due_date: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let risks = vec![
            risk("a", 5, 5, RiskStatus::Active),
            risk("b", 3, 5, RiskStatus::Accepted).with_mitigation(done("m1", "b")),
            risk("c", 2, 2, RiskStatus::Mitigated).with_mitigation(done("m2", "c")),
            risk("d", 2, 3, RiskStatus::Draft),
        ];
        let summary = DashboardSummary::from_scored(&annotate(&risks, &[]), 7);

        assert_eq!(summary.total_risks, 4);
        assert_eq!(summary.unresolved_risks, 3);
        assert_eq!(summary.mitigated_risks, 1);
        assert_eq!(summary.high_or_above, 2);
        assert_eq!(summary.total_mitigations, 2);
        assert_eq!(summary.total_assets, 7);
        // (25 + 15 + 6) / 3
        assert_eq!(summary.global_score, 15.33);
        assert_eq!(summary.by_severity[&SeverityTier::Critical], 1);
        assert_eq!(summary.by_severity[&SeverityTier::High], 1);
        assert_eq!(summary.by_severity[&SeverityTier::Medium], 0);
        assert_eq!(summary.by_severity[&SeverityTier::Low], 2);
        assert_eq!(summary.mitigation_candidates, vec!["b".to_string()]);
    }

    #[test]
    fn test_empty_snapshot() {
        let dashboard = Dashboard::new(&RiskboardConfig::default()).unwrap();
        let view = dashboard.build(&DashboardSnapshot::default());

        assert_eq!(view.summary.total_risks, 0);
        assert_eq!(view.summary.global_score, 0.0);
        assert_eq!(view.summary.by_severity.len(), 4);
        assert!(view.matrix.is_empty());
        assert!(view.top_risks.is_empty());
        assert!(view.trend.is_empty());
        assert!(view.profile.is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let dashboard = Dashboard::new(&RiskboardConfig::default()).unwrap();
        let snapshot = DashboardSnapshot {
            risks: vec![
                risk("a", 4, 4, RiskStatus::Active),
                risk("b", 1, 3, RiskStatus::Closed),
            ],
            ..DashboardSnapshot::default()
        };
        assert_eq!(dashboard.build(&snapshot), dashboard.build(&snapshot));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RiskboardConfig::default();
        config.gamification.level_thresholds = vec![0, 0];
        assert!(Dashboard::new(&config).is_err());
    }

    #[test]
    fn test_from_json_keeps_typed_rating_error() {
        let err = DashboardSnapshot::from_json(
            r#"{"risks":[{"id":"r","impact":9,"probability":1,"created_at":"2024-01-01T00:00:00Z"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}

//! Validated entity snapshots consumed by the engines.
//!
//! Risks, mitigations and assets are owned by the system of record; the
//! core only ever reads them. Wire payloads are converted into these types
//! once, at deserialization time (see [`records`]), so every engine can
//! rely on in-range ratings and a score that agrees with them.

pub mod records;
pub mod refined;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use records::RiskRecord;
pub use refined::{CostTier, Progress, Rating};

/// Lifecycle status of a risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskStatus {
    #[default]
    Draft,
    Active,
    Mitigated,
    Accepted,
    /// Archived by the system of record; treated like `Mitigated`
    Closed,
}

impl RiskStatus {
    /// Resolved risks no longer count towards open exposure.
    ///
    /// `Accepted` is a deliberate decision to live with the risk, so it
    /// stays unresolved.
    pub fn is_resolved(self) -> bool {
        matches!(self, RiskStatus::Mitigated | RiskStatus::Closed)
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskStatus::Draft => "DRAFT",
            RiskStatus::Active => "ACTIVE",
            RiskStatus::Mitigated => "MITIGATED",
            RiskStatus::Accepted => "ACCEPTED",
            RiskStatus::Closed => "CLOSED",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MitigationStatus {
    #[default]
    Planned,
    InProgress,
    Done,
}

/// Business criticality of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

/// A remediation action attached to a risk.
///
/// `risk_id` is a back-reference only; the risk owns its mitigations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    pub id: String,
    pub risk_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: MitigationStatus,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub cost: CostTier,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Mitigation {
    pub fn is_done(&self) -> bool {
        self.status == MitigationStatus::Done
    }
}

/// An inventoried asset that risks may be linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub asset_type: String,
    pub criticality: Criticality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// A validated risk snapshot.
///
/// The score is never stored: it is always `impact * probability`, so the
/// two can never disagree. Deserialization goes through [`RiskRecord`],
/// which rejects out-of-range ratings and contradicting stored scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RiskRecord", into = "RiskRecord")]
pub struct Risk {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Rating,
    pub probability: Rating,
    pub status: RiskStatus,
    pub tags: BTreeSet<String>,
    pub owner: Option<String>,
    pub mitigations: Vec<Mitigation>,
    pub created_at: DateTime<Utc>,
    pub asset_ids: Vec<String>,
}

impl Risk {
    /// Minimal constructor; remaining fields take their empty defaults.
    pub fn new(
        id: impl Into<String>,
        impact: Rating,
        probability: Rating,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            impact,
            probability,
            status: RiskStatus::default(),
            tags: BTreeSet::new(),
            owner: None,
            mitigations: Vec::new(),
            created_at,
            asset_ids: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_mitigation(mut self, mitigation: Mitigation) -> Self {
        self.mitigations.push(mitigation);
        self
    }

    pub fn with_assets<I, S>(mut self, asset_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_ids = asset_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Raw severity score, `impact * probability`, in `[1, 25]`.
    pub fn score(&self) -> u8 {
        self.impact.get() * self.probability.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// True when the risk has mitigations and every one of them is done.
    ///
    /// Such a risk is a candidate for moving to `MITIGATED`; the move
    /// itself is the system of record's decision.
    pub fn all_mitigations_done(&self) -> bool {
        !self.mitigations.is_empty() && self.mitigations.iter().all(Mitigation::is_done)
    }
}

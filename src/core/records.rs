//! Wire-shaped risk records and their conversion into validated risks.
//!
//! A `RiskRecord` mirrors the payload served by the system of record:
//! loosely typed ratings and an optional precomputed `score`. Conversion
//! happens exactly once; after it the core only sees [`Risk`].

use super::{Mitigation, Rating, Risk, RiskStatus};
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub impact: i64,
    pub probability: i64,
    /// Score as stored upstream; checked, never trusted
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_score"
    )]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: RiskStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub mitigations: Vec<Mitigation>,
    pub created_at: DateTime<Utc>,
    #[serde(default, rename = "assets")]
    pub asset_ids: Vec<String>,
}

impl TryFrom<RiskRecord> for Risk {
    type Error = Error;

    fn try_from(record: RiskRecord) -> Result<Self> {
        let impact = Rating::for_field("impact", record.impact)?;
        let probability = Rating::for_field("probability", record.probability)?;
        let expected = f64::from(impact.get() * probability.get());

        if let Some(stored) = record.score {
            if (stored - expected).abs() > f64::EPSILON {
                return Err(Error::programming(format!(
                    "risk {} stores score {} but impact {} x probability {} = {}",
                    record.id, stored, impact, probability, expected
                )));
            }
        }

        if let Some(foreign) = record.mitigations.iter().find(|m| m.risk_id != record.id) {
            return Err(Error::programming(format!(
                "mitigation {} is attached to risk {} but references risk {}",
                foreign.id, record.id, foreign.risk_id
            )));
        }

        Ok(Risk {
            id: record.id,
            title: record.title,
            description: record.description,
            impact,
            probability,
            status: record.status,
            tags: record.tags,
            owner: record.owner,
            mitigations: record.mitigations,
            created_at: record.created_at,
            asset_ids: record.asset_ids,
        })
    }
}

impl From<Risk> for RiskRecord {
    fn from(risk: Risk) -> Self {
        let score = f64::from(risk.score());
        Self {
            id: risk.id,
            title: risk.title,
            description: risk.description,
            impact: i64::from(risk.impact.get()),
            probability: i64::from(risk.probability.get()),
            score: Some(score),
            status: risk.status,
            tags: risk.tags,
            owner: risk.owner,
            mitigations: risk.mitigations,
            created_at: risk.created_at,
            asset_ids: risk.asset_ids,
        }
    }
}

/// Whole scores go out as integers, matching the other score fields.
fn serialize_score<S>(score: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match *score {
        Some(value) if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) => {
            serializer.serialize_u8(value as u8)
        }
        Some(value) => serializer.serialize_f64(value),
        None => serializer.serialize_none(),
    }
}

//! Progression layer: levels, progress and badges derived from XP and
//! activity counters.
//!
//! ## Architecture
//!
//! - **levels.rs**: validated XP threshold table
//! - **badges.rs**: badge criteria and catalogs
//! - **mod.rs**: snapshot types and the engine that ties them together
//!
//! XP and counters are owned by the system of record. The engine only
//! derives level, progress and badge flags from the snapshot it is given,
//! and derives them afresh on every call.

pub mod badges;
pub mod levels;

use crate::core::Risk;
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use badges::{
    default_badges, default_catalog, Badge, BadgeCatalog, BadgeCriterion, BadgeDefinition, Metric,
};
pub use levels::{LevelProgress, LevelTable};

/// Activity counters a badge criterion can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityCounters {
    #[serde(default)]
    pub risks_managed: u64,
    #[serde(default)]
    pub mitigations_done: u64,
}

impl ActivityCounters {
    /// Count a user's activity in a risk snapshot: risks they own and
    /// completed mitigations assigned to them.
    pub fn tally(risks: &[Risk], user_id: &str) -> Self {
        let risks_managed = risks
            .iter()
            .filter(|risk| risk.owner.as_deref() == Some(user_id))
            .count() as u64;
        let mitigations_done = risks
            .iter()
            .flat_map(|risk| &risk.mitigations)
            .filter(|m| m.is_done() && m.assignee.as_deref() == Some(user_id))
            .count() as u64;

        Self {
            risks_managed,
            mitigations_done,
        }
    }
}

/// Raw profile state as held by the system of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub user_id: String,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(flatten)]
    pub counters: ActivityCounters,
}

/// Derived, display-ready profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationProfile {
    pub user_id: String,
    pub total_xp: u64,
    pub level: u32,
    pub next_level_xp: u64,
    pub progress_percent: f64,
    pub risks_managed: u64,
    pub mitigations_done: u64,
    pub badges: Vec<Badge>,
}

impl GamificationProfile {
    pub fn unlocked_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|badge| badge.unlocked)
    }
}

#[derive(Debug, Clone)]
pub struct GamificationEngine {
    levels: LevelTable,
    catalog: Arc<BadgeCatalog>,
}

impl GamificationEngine {
    /// Build an engine from already-validated parts.
    pub fn new(levels: LevelTable, catalog: Arc<BadgeCatalog>) -> Self {
        Self { levels, catalog }
    }

    /// Build an engine from raw configuration, failing with a
    /// configuration error if either the table or the catalog is malformed.
    pub fn from_parts(thresholds: Vec<u64>, badges: Vec<BadgeDefinition>) -> Result<Self> {
        let levels = LevelTable::new(thresholds)?;
        let catalog = BadgeCatalog::new(badges)?;
        Ok(Self::new(levels, Arc::new(catalog)))
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn catalog(&self) -> &BadgeCatalog {
        &self.catalog
    }

    pub fn derive_profile(&self, snapshot: &ProfileSnapshot) -> GamificationProfile {
        let LevelProgress {
            level,
            next_level_xp,
            progress_percent,
        } = self.levels.progress(snapshot.total_xp);
        let badges = self.catalog.evaluate(snapshot);

        tracing::debug!(
            user = %snapshot.user_id,
            xp = snapshot.total_xp,
            level,
            unlocked = badges.iter().filter(|b| b.unlocked).count(),
            "derived gamification profile"
        );

        GamificationProfile {
            user_id: snapshot.user_id.clone(),
            total_xp: snapshot.total_xp,
            level,
            next_level_xp,
            progress_percent,
            risks_managed: snapshot.counters.risks_managed,
            mitigations_done: snapshot.counters.mitigations_done,
            badges,
        }
    }
}

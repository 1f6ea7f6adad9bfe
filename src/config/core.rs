use serde::{Deserialize, Serialize};

use crate::aggregation::TrendConfig;
use crate::errors::Result;
use crate::gamification::{
    default_badges, default_catalog, BadgeDefinition, GamificationEngine, LevelTable,
};

/// Root configuration structure for riskboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskboardConfig {
    /// Top-risk list settings
    pub ranking: RankingConfig,

    /// Posture trend bucketing and reduction
    pub trend: TrendConfig,

    /// Level curve and badge catalog
    pub gamification: GamificationConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of risks shown in the top-risk list
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationConfig {
    /// Cumulative XP needed for each level, level 1 first
    #[serde(default = "default_level_thresholds")]
    pub level_thresholds: Vec<u64>,

    #[serde(default = "default_badges")]
    pub badges: Vec<BadgeDefinition>,
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            level_thresholds: default_level_thresholds(),
            badges: default_badges(),
        }
    }
}

impl GamificationConfig {
    /// Build the engine; a malformed table or catalog fails here, once.
    ///
    /// The stock badge set shares the process-wide catalog.
    pub fn engine(&self) -> Result<GamificationEngine> {
        if self.badges == default_badges() {
            let levels = LevelTable::new(self.level_thresholds.clone())?;
            return Ok(GamificationEngine::new(levels, default_catalog()));
        }
        GamificationEngine::from_parts(self.level_thresholds.clone(), self.badges.clone())
    }
}

const DEFAULT_MAX_LEVEL: u64 = 20;
const DEFAULT_LEVEL_BASE_XP: u64 = 100;

/// `100 * (level - 1)^2` for levels 1 to 20.
pub fn default_level_thresholds() -> Vec<u64> {
    (0..DEFAULT_MAX_LEVEL)
        .map(|k| DEFAULT_LEVEL_BASE_XP * k * k)
        .collect()
}

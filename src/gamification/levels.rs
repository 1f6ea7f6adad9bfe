//! XP threshold table and level derivation.
//!
//! Level `k` (1-based) requires cumulative XP of at least `thresholds[k-1]`.
//! The table is configuration: it is validated once when built and every
//! lookup after that is infallible.

use crate::errors::{collect_problems, Result};
use serde::{Deserialize, Serialize};

/// Derived level position for an XP total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub next_level_xp: u64,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

impl LevelTable {
    /// Build a table, reporting every problem at once.
    ///
    /// The first threshold must be 0 so that every XP total has a level,
    /// and thresholds must be strictly increasing.
    pub fn new(thresholds: Vec<u64>) -> Result<Self> {
        collect_problems(threshold_problems(&thresholds))?;
        Ok(Self { thresholds })
    }

    /// Quadratic curve: level `k` needs `base_xp * (k-1)^2`.
    ///
    /// With `base_xp = 100` this reproduces 0, 100, 400, 900, ...
    pub fn quadratic(base_xp: u64, max_level: u32) -> Result<Self> {
        let thresholds = (0..u64::from(max_level))
            .map(|k| base_xp.saturating_mul(k.saturating_mul(k)))
            .collect();
        Self::new(thresholds)
    }

    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// XP needed to reach `level`, if the level exists.
    pub fn threshold(&self, level: u32) -> Option<u64> {
        let index = usize::try_from(level.checked_sub(1)?).ok()?;
        self.thresholds.get(index).copied()
    }

    /// Highest level whose threshold `total_xp` meets.
    pub fn level_for(&self, total_xp: u64) -> u32 {
        self.thresholds.partition_point(|threshold| *threshold <= total_xp) as u32
    }

    pub fn progress(&self, total_xp: u64) -> LevelProgress {
        let level = self.level_for(total_xp);
        match (self.threshold(level), self.threshold(level + 1)) {
            (Some(current), Some(next)) => {
                let span = (next - current) as f64;
                let earned = total_xp.saturating_sub(current) as f64;
                LevelProgress {
                    level,
                    next_level_xp: next,
                    progress_percent: (100.0 * earned / span).clamp(0.0, 100.0),
                }
            }
            // At the top of the table there is nothing left to progress towards.
            _ => LevelProgress {
                level,
                next_level_xp: total_xp,
                progress_percent: 100.0,
            },
        }
    }
}

pub(crate) fn threshold_problems(thresholds: &[u64]) -> Vec<String> {
    let mut problems = Vec::new();

    match thresholds.first() {
        None => problems.push("level thresholds must define at least one level".to_string()),
        Some(first) if *first != 0 => problems.push(format!(
            "level thresholds must start at 0 (level 1), got {}",
            first
        )),
        Some(_) => {}
    }

    for (index, pair) in thresholds.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            problems.push(format!(
                "level thresholds must be strictly increasing: level {} needs {} but level {} needs {}",
                index + 1,
                pair[0],
                index + 2,
                pair[1]
            ));
        }
    }

    problems
}

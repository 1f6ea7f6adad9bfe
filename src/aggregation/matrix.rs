//! 5x5 exposure matrix.
//!
//! Binning uses the raw (impact, probability) pair; the score calculator is
//! only consulted to colour a cell. The matrix is sparse: cells with no
//! risks are absent and read back as zero.

use crate::core::{Rating, Risk};
use crate::errors::{Error, Result};
use crate::scoring::{score_ratings, SeverityTier};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Matrix coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub impact: Rating,
    pub probability: Rating,
}

impl CellKey {
    pub fn new(impact: Rating, probability: Rating) -> Self {
        Self {
            impact,
            probability,
        }
    }

    pub fn of(risk: &Risk) -> Self {
        Self::new(risk.impact, risk.probability)
    }
}

/// Rendered as `"impact-probability"`, the key the dashboard looks cells up by.
impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.impact, self.probability)
    }
}

/// One cell as handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub impact: u8,
    pub probability: u8,
    pub count: usize,
    pub score: u8,
    pub tier: SeverityTier,
}

impl MatrixCell {
    fn at(key: CellKey, count: usize) -> Self {
        let assessed = score_ratings(key.impact, key.probability);
        Self {
            impact: key.impact.get(),
            probability: key.probability.get(),
            count,
            score: assessed.score,
            tier: assessed.tier,
        }
    }
}

/// Pre-grouped count as produced by a `GROUP BY impact, probability` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedCount {
    pub impact: i64,
    pub probability: i64,
    pub count: usize,
}

/// Sparse count grid keyed by (impact, probability).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskMatrix {
    cells: BTreeMap<CellKey, usize>,
}

impl RiskMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every risk into its cell.
    pub fn aggregate(risks: &[Risk]) -> Self {
        let mut matrix = Self::new();
        for risk in risks {
            matrix.record(CellKey::of(risk));
        }
        tracing::debug!(
            risks = risks.len(),
            occupied = matrix.cells.len(),
            "aggregated exposure matrix"
        );
        matrix
    }

    /// Rebuild a matrix from counts grouped upstream.
    ///
    /// Out-of-range coordinates mean upstream validation was bypassed, so
    /// they fail fast instead of being clamped.
    pub fn from_grouped(groups: &[GroupedCount]) -> Result<Self> {
        let mut matrix = Self::new();
        for group in groups {
            let key = grouped_key(group)?;
            if group.count > 0 {
                *matrix.cells.entry(key).or_insert(0) += group.count;
            }
        }
        Ok(matrix)
    }

    fn record(&mut self, key: CellKey) {
        *self.cells.entry(key).or_insert(0) += 1;
    }

    /// Count at a cell; absent cells are zero.
    pub fn count(&self, impact: Rating, probability: Rating) -> usize {
        self.cells
            .get(&CellKey::new(impact, probability))
            .copied()
            .unwrap_or(0)
    }

    /// Count by the `"impact-probability"` key.
    pub fn count_by_key(&self, key: &str) -> usize {
        self.cells
            .iter()
            .find(|(cell, _)| cell.to_string() == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.cells.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells only.
    pub fn cells(&self) -> Vec<MatrixCell> {
        self.cells
            .iter()
            .map(|(key, count)| MatrixCell::at(*key, *count))
            .collect()
    }

    /// Occupied cells keyed by `"impact-probability"`.
    pub fn to_key_map(&self) -> BTreeMap<String, usize> {
        self.cells
            .iter()
            .map(|(key, count)| (key.to_string(), *count))
            .collect()
    }

    /// All 25 cells in display order: probability rows from 5 down to 1,
    /// impact columns from 1 up to 5. Empty cells carry a zero count.
    pub fn grid(&self) -> Vec<MatrixCell> {
        Rating::all()
            .rev()
            .flat_map(|probability| {
                Rating::all().map(move |impact| {
                    let key = CellKey::new(impact, probability);
                    MatrixCell::at(key, self.cells.get(&key).copied().unwrap_or(0))
                })
            })
            .collect()
    }
}

fn grouped_key(group: &GroupedCount) -> Result<CellKey> {
    let impact = Rating::for_field("impact", group.impact).map_err(|_| {
        Error::programming(format!(
            "matrix cell {}-{} has impact outside 1..=5",
            group.impact, group.probability
        ))
    })?;
    let probability = Rating::for_field("probability", group.probability).map_err(|_| {
        Error::programming(format!(
            "matrix cell {}-{} has probability outside 1..=5",
            group.impact, group.probability
        ))
    })?;
    Ok(CellKey::new(impact, probability))
}

/// Serialized as the sparse list of occupied cells.
impl Serialize for RiskMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.cells())
    }
}

/// Bin risks into the exposure matrix.
pub fn aggregate(risks: &[Risk]) -> RiskMatrix {
    RiskMatrix::aggregate(risks)
}

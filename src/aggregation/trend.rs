//! Time-bucketed score series for the posture chart.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucketing {
    #[default]
    Day,
    /// ISO weeks, starting on Monday
    Week,
}

impl Bucketing {
    /// Truncate a timestamp (UTC) to the start date of its bucket.
    pub fn bucket_start(self, timestamp: DateTime<Utc>) -> NaiveDate {
        let date = timestamp.date_naive();
        match self {
            Bucketing::Day => date,
            Bucketing::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset)).unwrap_or(date)
            }
        }
    }

    fn step(self) -> Days {
        match self {
            Bucketing::Day => Days::new(1),
            Bucketing::Week => Days::new(7),
        }
    }
}

/// How the scores inside one bucket are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    #[default]
    Mean,
    Min,
    Max,
}

impl Reducer {
    /// Reduce a non-empty slice of finite values.
    fn reduce(self, values: &[f64]) -> f64 {
        match self {
            Reducer::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Reducer::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Reducer::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub bucketing: Bucketing,
    pub reducer: Reducer,
    /// Emit a zero point for every empty bucket between the first and last
    pub fill_gaps: bool,
}

/// A score observed at a point in time (e.g. a daily global-score snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimestampedScore {
    pub timestamp: DateTime<Utc>,
    pub score: f64,
}

/// One point of the chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAggregator {
    config: TrendConfig,
}

impl TrendAggregator {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Bucket, reduce and order the snapshots ascending by bucket start.
    ///
    /// Non-finite scores are skipped. Empty input gives an empty series;
    /// the "no data" state belongs to the chart.
    pub fn trend(&self, snapshots: &[TimestampedScore]) -> Vec<TrendPoint> {
        let buckets = self.bucket(snapshots);
        let mut points: Vec<TrendPoint> = buckets
            .iter()
            .map(|(date, values)| TrendPoint {
                date: *date,
                score: self.config.reducer.reduce(values),
            })
            .collect();

        if self.config.fill_gaps {
            points = fill_gaps(points, self.config.bucketing);
        }

        tracing::debug!(
            snapshots = snapshots.len(),
            points = points.len(),
            "aggregated trend"
        );
        points
    }

    fn bucket(&self, snapshots: &[TimestampedScore]) -> BTreeMap<NaiveDate, Vec<f64>> {
        let mut buckets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for snapshot in snapshots {
            if !snapshot.score.is_finite() {
                tracing::warn!(
                    timestamp = %snapshot.timestamp,
                    "skipping non-finite trend score"
                );
                continue;
            }
            buckets
                .entry(self.config.bucketing.bucket_start(snapshot.timestamp))
                .or_default()
                .push(snapshot.score);
        }
        buckets
    }
}

/// Insert zero points for missing buckets between the first and last point.
fn fill_gaps(points: Vec<TrendPoint>, bucketing: Bucketing) -> Vec<TrendPoint> {
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return points;
    };

    let observed: BTreeMap<NaiveDate, f64> = points.iter().map(|p| (p.date, p.score)).collect();
    let mut filled = Vec::with_capacity(points.len());
    let mut cursor = Some(first.date);

    while let Some(date) = cursor.filter(|date| *date <= last.date) {
        filled.push(TrendPoint {
            date,
            score: observed.get(&date).copied().unwrap_or(0.0),
        });
        cursor = date.checked_add_days(bucketing.step());
    }
    filled
}

/// Mean score per bucket, no gap filling.
pub fn trend(snapshots: &[TimestampedScore], bucketing: Bucketing) -> Vec<TrendPoint> {
    TrendAggregator::new(TrendConfig {
        bucketing,
        ..TrendConfig::default()
    })
    .trend(snapshots)
}

//! Display-ready aggregates over a risk snapshot.
//!
//! - **matrix.rs**: 5x5 (impact x probability) count grid
//! - **ranking.rs**: top-N unresolved risks by score
//! - **trend.rs**: bucketed score series
//!
//! Each aggregator is a pure function of its input snapshot; none of them
//! share state, so the caller decides which snapshot they all see.

pub mod matrix;
pub mod ranking;
pub mod trend;

pub use matrix::{CellKey, GroupedCount, MatrixCell, RiskMatrix};
pub use ranking::{ranking_order, top_risks, top_scored};
pub use trend::{
    Bucketing, Reducer, TimestampedScore, TrendAggregator, TrendConfig, TrendPoint,
};

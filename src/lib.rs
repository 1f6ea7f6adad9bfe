// Export modules for library usage
pub mod aggregation;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod errors;
pub mod gamification;
pub mod io;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{
    Asset, Criticality, Mitigation, MitigationStatus, Rating, Risk, RiskRecord, RiskStatus,
};

pub use crate::errors::{Error, Result};

pub use crate::scoring::{annotate, score, RiskScore, ScoredRisk, SeverityTier};

pub use crate::aggregation::{
    top_risks, Bucketing, RiskMatrix, TimestampedScore, TrendAggregator, TrendConfig, TrendPoint,
};

pub use crate::gamification::{
    GamificationEngine, GamificationProfile, LevelTable, ProfileSnapshot,
};

pub use crate::dashboard::{Dashboard, DashboardSnapshot, DashboardSummary, DashboardView};

pub use crate::config::{load_config, RiskboardConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

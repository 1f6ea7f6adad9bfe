use super::{destination, resolve_config};
use crate::aggregation::Bucketing;
use crate::config::RiskboardConfig;
use crate::dashboard::{Dashboard, DashboardSnapshot};
use crate::io::{self, create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub snapshot: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub bucket: Option<Bucketing>,
    pub fill_gaps: bool,
    pub config: Option<PathBuf>,
}

/// Command-line flags win over the config file.
pub fn apply_overrides(mut config: RiskboardConfig, options: &DashboardOptions) -> RiskboardConfig {
    if let Some(top) = options.top {
        config.ranking.top_n = top;
    }
    if let Some(bucket) = options.bucket {
        config.trend.bucketing = bucket;
    }
    if options.fill_gaps {
        config.trend.fill_gaps = true;
    }
    config
}

pub fn run_dashboard(options: DashboardOptions) -> Result<()> {
    let config = apply_overrides(resolve_config(options.config.as_deref())?, &options);
    let dashboard = Dashboard::new(&config).context("invalid dashboard settings")?;

    let json = io::read_file(&options.snapshot)?;
    let snapshot = DashboardSnapshot::from_json(&json)
        .with_context(|| format!("invalid snapshot {}", options.snapshot.display()))?;
    tracing::info!(
        risks = snapshot.risks.len(),
        assets = snapshot.assets.len(),
        history = snapshot.history.len(),
        "loaded snapshot"
    );

    let view = dashboard.build(&snapshot);
    let mut writer = create_writer(options.format, destination(options.output.as_deref())?);
    writer.write_dashboard(&view)
}

use super::{destination, resolve_config};
use crate::dashboard::DashboardSnapshot;
use crate::gamification::{ActivityCounters, ProfileSnapshot};
use crate::io::{self, create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct ProfileOptions {
    pub profile: PathBuf,
    pub risks: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

pub fn run_profile(options: ProfileOptions) -> Result<()> {
    let engine = resolve_config(options.config.as_deref())?
        .gamification
        .engine()
        .context("invalid gamification settings")?;

    let json = io::read_file(&options.profile)?;
    let mut snapshot: ProfileSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("invalid profile {}", options.profile.display()))?;

    if let Some(path) = &options.risks {
        let risks = DashboardSnapshot::from_json(&io::read_file(path)?)
            .with_context(|| format!("invalid snapshot {}", path.display()))?
            .risks;
        snapshot.counters = ActivityCounters::tally(&risks, &snapshot.user_id);
        tracing::debug!(
            risks_managed = snapshot.counters.risks_managed,
            mitigations_done = snapshot.counters.mitigations_done,
            "tallied activity from snapshot"
        );
    }

    let profile = engine.derive_profile(&snapshot);
    let mut writer = create_writer(options.format, destination(None)?);
    writer.write_profile(&profile)
}

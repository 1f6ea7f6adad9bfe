pub mod dashboard;
pub mod init;
pub mod profile;
pub mod score;

pub use dashboard::{run_dashboard, DashboardOptions};
pub use init::init_config;
pub use profile::{run_profile, ProfileOptions};
pub use score::run_score;

use crate::config::{load_config, load_config_from_path, RiskboardConfig};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Explicit `--config` path, or the nearest `.riskboard.toml`.
pub(crate) fn resolve_config(explicit: Option<&Path>) -> Result<RiskboardConfig> {
    match explicit {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("invalid configuration {}", path.display())),
        None => load_config().context("invalid configuration"),
    }
}

pub(crate) fn destination(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

use crate::dashboard::DashboardView;
use crate::gamification::GamificationProfile;
use crate::io::writers::{JsonWriter, TerminalWriter};
use crate::scoring::RiskScore;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()>;

    fn write_score(&mut self, score: &RiskScore) -> anyhow::Result<()>;

    fn write_profile(&mut self, profile: &GamificationProfile) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    format: OutputFormat,
    destination: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(destination)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(destination)),
    }
}

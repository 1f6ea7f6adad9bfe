use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskboard")]
#[command(about = "Risk posture dashboard: scoring, matrix, trends and profiles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the dashboard for a JSON snapshot
    Dashboard {
        /// Snapshot file (risks, assets, history, profile)
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of top risks to show (overrides config)
        #[arg(long)]
        top: Option<usize>,

        /// Trend bucket size (overrides config)
        #[arg(long, value_enum)]
        bucket: Option<TrendBucket>,

        /// Emit zero points for empty trend buckets
        #[arg(long)]
        fill_gaps: bool,

        /// Configuration file (defaults to the nearest .riskboard.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score one impact/probability pair
    Score {
        /// Impact rating, 1 to 5
        #[arg(allow_negative_numbers = true)]
        impact: i64,

        /// Probability rating, 1 to 5
        #[arg(allow_negative_numbers = true)]
        probability: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,
    },

    /// Derive level, progress and badges for a profile
    Profile {
        /// Profile file (user_id, total_xp, counters)
        profile: PathBuf,

        /// Snapshot whose risks are tallied for the profile's counters
        #[arg(long)]
        risks: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Configuration file (defaults to the nearest .riskboard.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default .riskboard.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrendBucket {
    /// Calendar day (UTC)
    Day,
    /// ISO week starting Monday (UTC)
    Week,
}

impl From<TrendBucket> for crate::aggregation::Bucketing {
    fn from(bucket: TrendBucket) -> Self {
        match bucket {
            TrendBucket::Day => crate::aggregation::Bucketing::Day,
            TrendBucket::Week => crate::aggregation::Bucketing::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_overrides() {
        let cli = Cli::try_parse_from([
            "riskboard",
            "dashboard",
            "snap.json",
            "--format",
            "json",
            "--top",
            "3",
            "--bucket",
            "week",
            "--fill-gaps",
        ])
        .unwrap();

        match cli.command {
            Commands::Dashboard {
                snapshot,
                format,
                top,
                bucket,
                fill_gaps,
                ..
            } => {
                assert_eq!(snapshot, PathBuf::from("snap.json"));
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(top, Some(3));
                assert_eq!(bucket, Some(TrendBucket::Week));
                assert!(fill_gaps);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_score_accepts_negative_ratings_for_validation() {
        let cli = Cli::try_parse_from(["riskboard", "score", "-1", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Score {
                impact: -1,
                probability: 3,
                ..
            }
        ));
    }
}

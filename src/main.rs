use anyhow::Result;
use clap::Parser;
use riskboard::cli::{Cli, Commands};
use riskboard::commands::{self, DashboardOptions, ProfileOptions};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Dashboard {
            snapshot,
            format,
            output,
            top,
            bucket,
            fill_gaps,
            config,
        } => commands::run_dashboard(DashboardOptions {
            snapshot,
            format: format.into(),
            output,
            top,
            bucket: bucket.map(Into::into),
            fill_gaps,
            config,
        }),
        Commands::Score {
            impact,
            probability,
            format,
        } => commands::run_score(impact, probability, format.into()),
        Commands::Profile {
            profile,
            risks,
            format,
            config,
        } => commands::run_profile(ProfileOptions {
            profile,
            risks,
            format: format.into(),
            config,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

// RUST_LOG wins; otherwise warnings only, or debug with -v.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

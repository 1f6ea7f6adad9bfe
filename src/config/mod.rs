// Core configuration types
mod core;
mod loader;
pub mod validation;

pub use core::{default_level_thresholds, GamificationConfig, RankingConfig, RiskboardConfig};

pub use loader::{
    default_config_toml, directory_ancestors, find_config_file, load_config, load_config_from,
    load_config_from_path, parse_and_validate_config, CONFIG_FILE_NAME,
};

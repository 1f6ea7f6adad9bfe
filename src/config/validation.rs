//! Validation with error accumulation for configuration.
//!
//! Every section is checked and all problems are reported together, so a
//! user fixing `.riskboard.toml` sees the whole list in one run.
//!
//! # Example
//!
//! ```rust
//! use riskboard::config::validation::validate_config;
//! use riskboard::config::RiskboardConfig;
//!
//! let config = RiskboardConfig::default();
//! assert!(validate_config(&config).is_success());
//! ```

use super::core::{GamificationConfig, RankingConfig};
use super::RiskboardConfig;
use crate::errors::{into_result, validation_from_problems, ConfigValidation, Result};
use crate::gamification::badges::catalog_problems;
use crate::gamification::levels::threshold_problems;

/// Validate the entire config, accumulating ALL problems.
pub fn validate_config(config: &RiskboardConfig) -> ConfigValidation<()> {
    let mut problems = Vec::new();
    problems.extend(ranking_problems(&config.ranking));
    problems.extend(gamification_problems(&config.gamification));
    validation_from_problems(problems)
}

/// Fail-fast wrapper over [`validate_config`].
pub fn validate_config_result(config: &RiskboardConfig) -> Result<()> {
    into_result(validate_config(config))
}

fn ranking_problems(ranking: &RankingConfig) -> Vec<String> {
    if ranking.top_n == 0 {
        vec!["ranking.top_n must be greater than zero".to_string()]
    } else {
        Vec::new()
    }
}

fn gamification_problems(gamification: &GamificationConfig) -> Vec<String> {
    threshold_problems(&gamification.level_thresholds)
        .into_iter()
        .chain(catalog_problems(&gamification.badges))
        .map(|problem| format!("gamification: {}", problem))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config_result(&RiskboardConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let mut config = RiskboardConfig::default();
        config.ranking.top_n = 0;
        let err = validate_config_result(&config).unwrap_err();
        assert!(err.to_string().contains("ranking.top_n"));
    }

    #[test]
    fn test_accumulates_every_section() {
        let mut config = RiskboardConfig::default();
        config.ranking.top_n = 0;
        config.gamification.level_thresholds = vec![10, 5];
        let duplicate = config.gamification.badges[0].clone();
        config.gamification.badges.push(duplicate);

        match validate_config_result(&config).unwrap_err() {
            Error::Configuration(message) => {
                let lines: Vec<&str> = message.lines().collect();
                assert_eq!(lines.len(), 4, "{message}");
                assert!(lines[0].starts_with("ranking.top_n"));
                assert!(lines[1..].iter().all(|l| l.starts_with("gamification:")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

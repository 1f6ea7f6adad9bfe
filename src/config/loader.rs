use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::RiskboardConfig;
use super::validation::validate_config_result;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".riskboard.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse a TOML document and validate every section.
pub fn parse_and_validate_config(contents: &str) -> Result<RiskboardConfig> {
    let config = toml::from_str::<RiskboardConfig>(contents)?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Load and validate the config at an explicit path.
pub fn load_config_from_path(path: &Path) -> Result<RiskboardConfig> {
    let contents = read_config_file(path)?;
    let config = parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Configuration(message) => {
            Error::Configuration(format!("{}:\n{}", path.display(), message))
        }
        other => other,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest `.riskboard.toml` at or above `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Load the nearest config above `start`, or defaults when there is none.
///
/// A config file that exists but is malformed is an error, not a silent
/// fallback: engines must not start with a half-applied configuration.
pub fn load_config_from(start: &Path) -> Result<RiskboardConfig> {
    match find_config_file(start) {
        Some(path) => load_config_from_path(&path),
        None => {
            tracing::debug!(
                depth = MAX_TRAVERSAL_DEPTH,
                "no {} found, using defaults",
                CONFIG_FILE_NAME
            );
            Ok(RiskboardConfig::default())
        }
    }
}

/// Load the nearest config above the current directory.
pub fn load_config() -> Result<RiskboardConfig> {
    let current = std::env::current_dir()?;
    load_config_from(&current)
}

/// Default configuration rendered as TOML, as written by `riskboard init`.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&RiskboardConfig::default())
        .map_err(|e| Error::configuration(format!("failed to render default config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::Bucketing;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            parse_and_validate_config("").unwrap(),
            RiskboardConfig::default()
        );
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [ranking]
            top_n = 10

            [trend]
            bucketing = "week"
        "#})
        .unwrap();

        assert_eq!(config.ranking.top_n, 10);
        assert_eq!(config.trend.bucketing, Bucketing::Week);
        assert!(!config.trend.fill_gaps);
        assert_eq!(config.gamification.badges.len(), 4);
        assert_eq!(config.gamification.level_thresholds[1], 100);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = parse_and_validate_config("invalid toml [[ content").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_non_monotonic_thresholds_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [gamification]
            level_thresholds = [0, 500, 200]
        "#})
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_default_config_round_trips() {
        let rendered = default_config_toml().unwrap();
        assert_eq!(
            parse_and_validate_config(&rendered).unwrap(),
            RiskboardConfig::default()
        );
    }

    #[test]
    fn test_directory_ancestors_depth_limit() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_discovers_config_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("team").join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[ranking]\ntop_n = 3\n",
        )
        .unwrap();

        let config = load_config_from(&nested).unwrap();
        assert_eq!(config.ranking.top_n, 3);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let isolated = temp.path().join("x").join("y").join("z");
        fs::create_dir_all(&isolated).unwrap();
        // Ancestors above the temp dir are outside our control.
        if find_config_file(&isolated).is_none() {
            assert_eq!(
                load_config_from(&isolated).unwrap(),
                RiskboardConfig::default()
            );
        }
    }

    #[test]
    fn test_malformed_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[ranking]\ntop_n = 0\n").unwrap();

        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}

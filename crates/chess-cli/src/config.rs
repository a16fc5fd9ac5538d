//! Configuration file loading for the command-line harness.
//!
//! Values from `chess.toml` supply defaults; command-line flags override
//! them.

use chess_ai::Difficulty;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Defaults for the `self-play` command.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SelfPlayConfig {
    #[serde(default)]
    pub white: Difficulty,
    #[serde(default)]
    pub black: Difficulty,
    /// Plies to play before stopping an unfinished game. Defaults to 200.
    #[serde(default = "default_max_plies")]
    pub max_plies: usize,
    /// RNG seed for reproducible games. Unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_plies() -> usize {
    200
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            white: Difficulty::default(),
            black: Difficulty::default(),
            max_plies: default_max_plies(),
            seed: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Difficulty used by `best-move` when none is given.
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub self_play: SelfPlayConfig,
}

impl CliConfig {
    /// Loads the configuration from `path`, or the default when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `chess.toml` in the working
    /// directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
difficulty = "hard"

[self_play]
white = "easy"
black = "medium"
max_plies = 40
seed = 7
"#;

        let config: CliConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.self_play.white, Difficulty::Easy);
        assert_eq!(config.self_play.black, Difficulty::Medium);
        assert_eq!(config.self_play.max_plies, 40);
        assert_eq!(config.self_play.seed, Some(7));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.self_play.max_plies, 200);
        assert_eq!(config.self_play.seed, None);
    }

    #[test]
    fn test_partial_self_play_section() {
        let config: CliConfig = toml::from_str("[self_play]\nwhite = \"hard\"\n").unwrap();
        assert_eq!(config.self_play.white, Difficulty::Hard);
        assert_eq!(config.self_play.black, Difficulty::Medium);
        assert_eq!(config.self_play.max_plies, 200);
    }

    #[test]
    fn test_unknown_difficulty_is_a_parse_error() {
        let result = toml::from_str::<CliConfig>("difficulty = \"expert\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("chess.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_reports_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "difficulty = [").unwrap();
        let result = CliConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "difficulty = \"easy\"\n[self_play]\nseed = 5\n").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.self_play.seed, Some(5));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = CliConfig {
            difficulty: Difficulty::Easy,
            self_play: SelfPlayConfig {
                seed: Some(3),
                ..SelfPlayConfig::default()
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: CliConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(CliConfig::config_path(), PathBuf::from("chess.toml"));
    }
}

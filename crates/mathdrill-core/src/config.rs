//! mathdrill configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::check::DEFAULT_TOLERANCE;
use crate::model::Difficulty;
use crate::tracker::TrackerConfig;

/// Environment variable that overrides `progress_file`.
pub const PROGRESS_FILE_ENV: &str = "MATHDRILL_PROGRESS_FILE";

/// Top-level mathdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Learner id stored in new progress snapshots.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Where the progress snapshot lives.
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Problems per practice session.
    #[serde(default = "default_session_length")]
    pub session_length: usize,
    /// Tolerance for numeric answers.
    #[serde(default = "default_tolerance")]
    pub answer_tolerance: f64,
    /// Fixed seed for reproducible problems.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

fn default_user_id() -> String {
    "default-user".to_string()
}
fn default_progress_file() -> PathBuf {
    PathBuf::from("mathdrill-progress.json")
}
fn default_session_length() -> usize {
    10
}
fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            progress_file: default_progress_file(),
            default_difficulty: Difficulty::Easy,
            session_length: default_session_length(),
            answer_tolerance: default_tolerance(),
            seed: None,
            tracker: TrackerConfig::default(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `mathdrill.toml` in the current directory
/// 2. `~/.config/mathdrill/config.toml`
///
/// Environment variable override: `MATHDRILL_PROGRESS_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mathdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(file) = std::env::var(PROGRESS_FILE_ENV) {
        if !file.is_empty() {
            config.progress_file = PathBuf::from(file);
        }
    }

    Ok(config)
}

/// Parse and sanity-check a TOML config document.
pub fn parse_config(content: &str) -> Result<DrillConfig> {
    let config: DrillConfig = toml::from_str(content)?;
    if !config.answer_tolerance.is_finite() || config.answer_tolerance < 0.0 {
        anyhow::bail!(
            "answer_tolerance must be a non-negative number, got {}",
            config.answer_tolerance
        );
    }
    if config.tracker.recent_scores_cap == 0 {
        anyhow::bail!("tracker.recent_scores_cap must be at least 1");
    }
    for (name, rule) in [
        ("medium_unlock", &config.tracker.medium_unlock),
        ("hard_unlock", &config.tracker.hard_unlock),
    ] {
        if !(0.0..=1.0).contains(&rule.min_accuracy) {
            anyhow::bail!(
                "tracker.{name}.min_accuracy must be between 0 and 1, got {}",
                rule.min_accuracy
            );
        }
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mathdrill"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = DrillConfig::default();
        assert_eq!(config.user_id, "default-user");
        assert_eq!(config.session_length, 10);
        assert_eq!(config.answer_tolerance, 0.01);
        assert_eq!(config.tracker.recent_scores_cap, 10);
        assert_eq!(config.tracker.medium_unlock.min_attempts, 5);
        assert_eq!(config.tracker.hard_unlock.min_accuracy, 0.8);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
user_id = "ada"
default_difficulty = "medium"
seed = 42

[tracker.medium_unlock]
min_accuracy = 0.6
min_attempts = 3
"#,
        )
        .unwrap();
        assert_eq!(config.user_id, "ada");
        assert_eq!(config.default_difficulty, Difficulty::Medium);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tracker.medium_unlock.min_attempts, 3);
        assert_eq!(config.tracker.hard_unlock.min_attempts, 10);
        assert_eq!(config.session_length, 10);
    }

    #[test]
    fn parse_rejects_bad_values() {
        assert!(parse_config("answer_tolerance = -1.0").is_err());
        assert!(parse_config("default_difficulty = \"expert\"").is_err());
        assert!(parse_config("[tracker]\nrecent_scores_cap = 0").is_err());
        assert!(parse_config(
            "[tracker.hard_unlock]\nmin_accuracy = 80.0\nmin_attempts = 10"
        )
        .is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/mathdrill.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "session_length = 3\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.session_length, 3);
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "session_length = [").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}

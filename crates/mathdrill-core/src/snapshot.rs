//! JSON snapshots of [`UserProgress`].
//!
//! The engine does no I/O during attempt processing. A host saves a snapshot
//! at session boundaries and loads it at startup. A missing or unusable
//! snapshot is replaced by the initial state, never by a partial one.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::DrillError;
use crate::tracker::{TrackerConfig, UserProgress};

impl UserProgress {
    /// Pretty-printed JSON snapshot.
    pub fn to_snapshot(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize progress")
    }

    /// Parse and validate a snapshot.
    ///
    /// Every topic must be present and the progress invariants must hold.
    /// Recent scores beyond the configured cap are dropped, oldest first, so
    /// a lowered cap shortens the history instead of rejecting it.
    pub fn from_snapshot(json: &str, config: &TrackerConfig) -> Result<Self, DrillError> {
        let mut progress: UserProgress =
            serde_json::from_str(json).map_err(|e| DrillError::InvalidSnapshot(e.to_string()))?;
        if progress.recent_scores.len() > config.recent_scores_cap {
            debug!(
                stored = progress.recent_scores.len(),
                cap = config.recent_scores_cap,
                "trimming recent scores to the configured cap"
            );
            progress.recent_scores.truncate(config.recent_scores_cap);
        }
        progress.check_invariants(config)?;
        Ok(progress)
    }

    /// Load a snapshot from `path`, falling back to the initial state for
    /// `user_id` when the file is missing or unusable.
    pub fn load_or_default(path: &Path, user_id: &str, config: &TrackerConfig) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no progress snapshot, starting fresh");
            return UserProgress::new(user_id);
        }
        match Self::load_json(path, config) {
            Ok(progress) => progress,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "ignoring unusable progress snapshot"
                );
                UserProgress::new(user_id)
            }
        }
    }

    /// Load and validate a snapshot file.
    pub fn load_json(path: &Path, config: &TrackerConfig) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read progress from {}", path.display()))?;
        let progress = Self::from_snapshot(&content, config)
            .with_context(|| format!("failed to load progress from {}", path.display()))?;
        Ok(progress)
    }

    /// Write the snapshot to `path`, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_snapshot()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create directory {}", parent.display())
                })?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write progress to {}", path.display()))?;
        Ok(())
    }
}

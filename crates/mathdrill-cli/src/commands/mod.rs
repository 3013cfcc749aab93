pub mod generate;
pub mod init;
pub mod practice;
pub mod progress;
pub mod reset;
pub mod topics;

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_core::config::{load_config_from, DrillConfig};
use mathdrill_core::tracker::ProgressTracker;
use mathdrill_core::{Difficulty, Problem, UserProgress};

/// Resolved configuration plus where progress is stored.
pub struct AppContext {
    pub config: DrillConfig,
    pub progress_path: PathBuf,
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>, progress_path: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path.as_deref())?;
        let progress_path = progress_path.unwrap_or_else(|| config.progress_file.clone());
        Ok(Self {
            config,
            progress_path,
        })
    }

    /// Tracker resumed from the stored snapshot, or fresh if there is none.
    pub fn tracker(&self) -> ProgressTracker {
        let progress = UserProgress::load_or_default(
            &self.progress_path,
            &self.config.user_id,
            &self.config.tracker,
        );
        ProgressTracker::from_progress(progress, self.config.tracker.clone())
    }

    pub fn save(&self, tracker: &ProgressTracker) -> Result<()> {
        tracker.progress().save_json(&self.progress_path)
    }

    pub fn difficulty(&self, requested: Option<&str>) -> Result<Difficulty> {
        match requested {
            Some(name) => Ok(name.parse()?),
            None => Ok(self.config.default_difficulty),
        }
    }
}

/// Option label for a zero-based index: A, B, C, ...
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Question followed by lettered options, if any.
pub fn render_problem(problem: &Problem) -> String {
    let mut out = problem.question.clone();
    if let Some(options) = &problem.options {
        for (i, option) in options.iter().enumerate() {
            out.push_str(&format!("\n  {}) {option}", option_label(i)));
        }
    }
    out
}

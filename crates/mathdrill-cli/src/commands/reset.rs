//! The `mathdrill reset` command.

use std::path::PathBuf;

use anyhow::Result;

use super::AppContext;

pub fn execute(config_path: Option<PathBuf>, progress_path: Option<PathBuf>) -> Result<()> {
    let ctx = AppContext::load(config_path, progress_path)?;
    let mut tracker = ctx.tracker();
    tracker.reset();
    ctx.save(&tracker)?;
    println!(
        "Progress reset for {} ({}).",
        tracker.progress().user_id,
        ctx.progress_path.display()
    );
    Ok(())
}

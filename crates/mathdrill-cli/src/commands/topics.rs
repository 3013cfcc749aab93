//! The `mathdrill topics` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mathdrill_core::{Difficulty, GeneratorRegistry, Topic};

use super::AppContext;

pub fn execute(config_path: Option<PathBuf>, progress_path: Option<PathBuf>) -> Result<()> {
    let ctx = AppContext::load(config_path, progress_path)?;
    let tracker = ctx.tracker();
    let registry = GeneratorRegistry::with_builtin();

    let mut table = Table::new();
    table.set_header(vec![
        "", "Topic", "Name", "Unlocked", "Attempted", "Accuracy", "Generator",
    ]);

    for topic in Topic::ALL {
        let unlocked: Vec<&str> = Difficulty::ALL
            .iter()
            .filter(|d| tracker.is_unlocked(topic, **d))
            .map(|d| d.as_str())
            .collect();
        let attempted = tracker
            .progress()
            .topic(topic)
            .map(|t| t.problems_attempted)
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(topic.icon()),
            Cell::new(topic.as_str()),
            Cell::new(topic.name()),
            Cell::new(unlocked.join(", ")),
            Cell::new(attempted),
            Cell::new(format!("{:.1}%", tracker.topic_accuracy(topic))),
            Cell::new(if registry.supports(topic) {
                "built-in"
            } else {
                "none"
            }),
        ]);
    }

    println!("{table}");
    Ok(())
}

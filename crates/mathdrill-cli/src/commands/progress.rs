//! The `mathdrill progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mathdrill_core::badges::CATALOG;
use mathdrill_core::numeric::format_percentage;
use mathdrill_core::Topic;

use super::AppContext;

pub fn execute(
    json: bool,
    config_path: Option<PathBuf>,
    progress_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AppContext::load(config_path, progress_path)?;
    let tracker = ctx.tracker();
    let progress = tracker.progress();

    if json {
        println!("{}", progress.to_snapshot()?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Attempted", "Correct", "Accuracy", "Avg Score", "Unlocked"]);
    for topic in Topic::ALL {
        let Some(tp) = progress.topic(topic) else {
            continue;
        };
        let unlocked: Vec<&str> = tp.difficulties_unlocked.iter().map(|d| d.as_str()).collect();
        table.add_row(vec![
            Cell::new(format!("{} {}", topic.icon(), topic.name())),
            Cell::new(tp.problems_attempted),
            Cell::new(tp.correct_answers),
            Cell::new(format_percentage(tp.accuracy_ratio(), 1)),
            Cell::new(format!("{:.1}", tp.average_score)),
            Cell::new(unlocked.join(", ")),
        ]);
    }

    println!("Progress for {}", progress.user_id);
    println!("{table}");
    println!(
        "Overall: {} attempted, {} correct, accuracy {:.1}%, grade {}",
        progress.total_problems_attempted,
        progress.total_correct,
        tracker.accuracy(),
        tracker.grade()
    );
    println!(
        "Streak: {} (best {})",
        progress.current_streak, progress.best_streak
    );
    if !progress.recent_scores.is_empty() {
        let recent: Vec<String> = progress
            .recent_scores
            .iter()
            .map(|s| format!("{s:.0}"))
            .collect();
        println!("Recent scores: {}", recent.join(" "));
    }

    println!("\nBadges ({}/{}):", progress.badges.len(), CATALOG.len());
    for badge in &progress.badges {
        println!(
            "  {} {} [{}] earned {}",
            badge.icon,
            badge.name,
            badge.rarity,
            badge.date_earned.format("%Y-%m-%d")
        );
    }
    for def in CATALOG.iter().filter(|d| !progress.has_badge(d.id)) {
        println!("  🔒 {} [{}] {}", def.name, def.rarity, def.description);
    }

    Ok(())
}

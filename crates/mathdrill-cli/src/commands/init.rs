//! The `mathdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathdrill.toml").exists() {
        println!("mathdrill.toml already exists, skipping.");
    } else {
        std::fs::write("mathdrill.toml", SAMPLE_CONFIG)?;
        println!("Created mathdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit mathdrill.toml to set your name and session length");
    println!("  2. Run: mathdrill topics");
    println!("  3. Run: mathdrill practice --topic fractions");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

user_id = "default-user"
progress_file = "mathdrill-progress.json"
default_difficulty = "easy"
session_length = 10
answer_tolerance = 0.01
# seed = 42

[tracker]
recent_scores_cap = 10

[tracker.medium_unlock]
min_accuracy = 0.7
min_attempts = 5

[tracker.hard_unlock]
min_accuracy = 0.8
min_attempts = 10
"#;

//! The `mathdrill generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathdrill_core::generator::attach_choices;
use mathdrill_core::{GeneratorRegistry, RngSource, Topic};

use super::{render_problem, AppContext};

/// Distractors offered with `--choices`, and how far they stray.
const CHOICE_COUNT: usize = 3;
const CHOICE_RANGE: i64 = 10;

pub fn execute(
    topic: String,
    difficulty: Option<String>,
    seed: Option<u64>,
    choices: bool,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AppContext::load(config_path, None)?;
    let topic: Topic = topic.parse()?;
    let difficulty = ctx.difficulty(difficulty.as_deref())?;

    let mut rng = RngSource::from_seed_option(seed.or(ctx.config.seed));
    let registry = GeneratorRegistry::with_builtin();
    let mut problem = registry.generate(topic, difficulty, &mut rng)?;
    if choices {
        problem = attach_choices(problem, &mut rng, CHOICE_COUNT, CHOICE_RANGE);
    }

    if json {
        let out = serde_json::to_string_pretty(&problem).context("failed to serialize problem")?;
        println!("{out}");
    } else {
        println!("[{} · {}] {}", topic.name(), difficulty, render_problem(&problem));
        if let Some(hints) = &problem.hints {
            for hint in hints {
                println!("  hint: {hint}");
            }
        }
    }

    Ok(())
}

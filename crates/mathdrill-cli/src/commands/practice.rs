//! The `mathdrill practice` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use mathdrill_core::session::PracticeSession;
use mathdrill_core::{DrillError, GeneratorRegistry, Problem, RngSource, Topic};

use super::{option_label, render_problem, AppContext};

pub fn execute(
    topic: String,
    difficulty: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    progress_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AppContext::load(config_path, progress_path)?;
    let topic: Topic = topic.parse()?;
    let difficulty = ctx.difficulty(difficulty.as_deref())?;
    let mut tracker = ctx.tracker();

    if !tracker.is_unlocked(topic, difficulty) {
        return Err(DrillError::DifficultyLocked { topic, difficulty }.into());
    }

    let seed = seed
        .or(ctx.config.seed)
        .unwrap_or_else(rand::random::<u64>);
    tracing::debug!(seed, "practice seed");

    let count = count.unwrap_or(ctx.config.session_length);
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let registry = GeneratorRegistry::with_builtin();
    let mut rng = RngSource::seeded(seed);
    let mut practice = PracticeSession::generate(&registry, topic, difficulty, count, &mut rng)?;

    println!(
        "{} {} ({difficulty}), {count} problem(s). Type your answer, '?' for a hint.\n",
        topic.icon(),
        topic.name()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(problem) = practice.current().cloned() {
        let number = practice.answered() + 1;
        println!("Problem {number}/{count}: {}", render_problem(&problem));

        let Some(answer) = read_answer(&mut lines, &problem)? else {
            println!("\nNo more input, ending the session early.");
            break;
        };

        let validation = practice.submit(&answer, ctx.config.answer_tolerance)?;
        if validation.is_correct {
            println!("✓ {}", validation.explanation);
        } else {
            println!("✗ {}", validation.explanation);
        }

        let outcome = tracker.record_attempt(&problem, &validation);
        for unlocked in &outcome.unlocked {
            println!("🔓 Unlocked {unlocked} {}!", topic.name());
        }
        for badge in &outcome.badges_earned {
            println!("{} Badge earned: {} ({})", badge.icon, badge.name, badge.description);
        }
        println!();
    }

    ctx.save(&tracker)?;

    let answered = practice.answered();
    let correct = practice.scores.iter().filter(|s| **s > 0.0).count();
    println!(
        "Session complete: {correct}/{answered} correct, average score {:.1}.",
        practice.average_score()
    );
    println!(
        "Overall accuracy {:.1}% (grade {}), streak {}.",
        tracker.accuracy(),
        tracker.grade(),
        tracker.progress().current_streak
    );

    Ok(())
}

/// Read the next answer, showing hints on `?`. `None` at end of input.
fn read_answer<B: BufRead>(
    lines: &mut io::Lines<B>,
    problem: &Problem,
) -> Result<Option<String>> {
    let mut hints = problem.hints.iter().flatten();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("failed to read answer")?;
        let input = line.trim();

        if input == "?" {
            match hints.next() {
                Some(hint) => println!("hint: {hint}"),
                None => println!("No more hints."),
            }
            continue;
        }
        if input.is_empty() {
            continue;
        }
        return Ok(Some(resolve_choice(problem, input)));
    }
}

/// Map a lettered choice (`a`, `B`) to its option text.
fn resolve_choice(problem: &Problem, input: &str) -> String {
    let Some(options) = &problem.options else {
        return input.to_string();
    };
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = c.to_ascii_uppercase();
        if let Some(option) = options
            .iter()
            .enumerate()
            .find(|(i, _)| option_label(*i) == c)
            .map(|(_, o)| o)
        {
            return option.clone();
        }
    }
    input.to_string()
}

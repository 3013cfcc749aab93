//! mathdrill CLI — randomized math practice in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "mathdrill",
    version,
    about = "Randomized math practice with progress tracking"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Progress snapshot path (overrides the config file)
    #[arg(long, global = true)]
    progress: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List topics with unlocked difficulties and accuracy
    Topics,

    /// Print one generated problem
    Generate {
        /// Topic, e.g. fractions, algebra, geometry, word-problems
        #[arg(long)]
        topic: String,

        /// easy, medium, or hard (default from config)
        #[arg(long)]
        difficulty: Option<String>,

        /// Seed for a reproducible problem
        #[arg(long)]
        seed: Option<u64>,

        /// Offer multiple-choice options when the answer is a whole number
        #[arg(long)]
        choices: bool,

        /// Print the full problem, answer included, as JSON
        #[arg(long)]
        json: bool,
    },

    /// Answer a run of problems on stdin and record the results
    Practice {
        #[arg(long)]
        topic: String,

        #[arg(long)]
        difficulty: Option<String>,

        /// Number of problems (default from config)
        #[arg(long)]
        count: Option<usize>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show accuracy, grade, streaks, and badges
    Progress {
        /// Print the raw progress snapshot
        #[arg(long)]
        json: bool,
    },

    /// Clear all recorded progress
    Reset,

    /// Create a starter mathdrill.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathdrill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    let progress = cli.progress;

    let result = match cli.command {
        Commands::Topics => commands::topics::execute(config, progress),
        Commands::Generate {
            topic,
            difficulty,
            seed,
            choices,
            json,
        } => commands::generate::execute(topic, difficulty, seed, choices, json, config),
        Commands::Practice {
            topic,
            difficulty,
            count,
            seed,
        } => commands::practice::execute(topic, difficulty, count, seed, config, progress),
        Commands::Progress { json } => commands::progress::execute(json, config, progress),
        Commands::Reset => commands::reset::execute(config, progress),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

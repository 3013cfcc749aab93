//! mathdrill-core — Problem generation and progress tracking engine.
//!
//! This crate defines the problem data model, the per-topic generators, answer
//! checking, and the progress tracker that turns a stream of attempts into
//! accuracy, streaks, difficulty unlocks, and badges.

pub mod badges;
pub mod check;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod numeric;
pub mod random;
pub mod session;
pub mod snapshot;
pub mod tracker;

pub use error::DrillError;
pub use generator::{generate, GeneratorRegistry, ProblemGenerator};
pub use model::{Answer, AnswerValidation, Difficulty, Problem, ProblemKind, Topic};
pub use random::{RandomSource, RngSource};
pub use tracker::{ProgressTracker, UserProgress};

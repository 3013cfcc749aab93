//! Engine error types.
//!
//! These represent contract violations by the caller. Learner mistakes
//! (wrong or unreadable answers) are never errors; they produce an incorrect
//! [`AnswerValidation`](crate::model::AnswerValidation) instead.

use thiserror::Error;

use crate::model::{Difficulty, Topic};

/// Errors returned by the mathdrill engine.
#[derive(Debug, Error)]
pub enum DrillError {
    /// A topic name did not match any known topic.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// A difficulty name did not match easy, medium, or hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// The topic is known but nothing is registered to generate it.
    #[error("no generator registered for topic '{0}'")]
    NoGenerator(Topic),

    /// The learner has not unlocked this difficulty for the topic yet.
    #[error("difficulty '{difficulty}' is locked for topic '{topic}'")]
    DifficultyLocked { topic: Topic, difficulty: Difficulty },

    /// A stored progress snapshot could not be used.
    #[error("invalid progress snapshot: {0}")]
    InvalidSnapshot(String),

    /// Every problem in the practice session has been answered.
    #[error("practice session is already complete")]
    SessionComplete,
}

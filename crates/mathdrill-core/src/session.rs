//! A practice session: a fixed run of problems for one topic and difficulty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::check::validate_answer;
use crate::error::DrillError;
use crate::generator::GeneratorRegistry;
use crate::model::{AnswerValidation, Difficulty, Problem, Topic};
use crate::random::RandomSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    pub session_id: Uuid,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub problems: Vec<Problem>,
    pub current_problem_index: usize,
    pub user_answers: Vec<String>,
    pub scores: Vec<f64>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
}

impl PracticeSession {
    /// A session over an existing problem list.
    pub fn new(topic: Topic, difficulty: Difficulty, problems: Vec<Problem>) -> Self {
        let session = Self {
            session_id: Uuid::new_v4(),
            topic,
            difficulty,
            problems,
            current_problem_index: 0,
            user_answers: Vec::new(),
            scores: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
        };
        if session.problems.is_empty() {
            return Self {
                end_time: Some(session.start_time),
                ..session
            };
        }
        session
    }

    /// Generate `count` problems up front.
    pub fn generate(
        registry: &GeneratorRegistry,
        topic: Topic,
        difficulty: Difficulty,
        count: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<Self, DrillError> {
        let problems = (0..count)
            .map(|_| registry.generate(topic, difficulty, rng))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count, %topic, %difficulty, "practice session generated");
        Ok(Self::new(topic, difficulty, problems))
    }

    /// The problem awaiting an answer, if any.
    pub fn current(&self) -> Option<&Problem> {
        self.problems.get(self.current_problem_index)
    }

    /// Grade `answer` against the current problem and advance.
    pub fn submit(&mut self, answer: &str, tolerance: f64) -> Result<AnswerValidation, DrillError> {
        let problem = self.current().ok_or(DrillError::SessionComplete)?;
        let validation = validate_answer(problem, answer, tolerance);

        self.user_answers.push(validation.user_answer.clone());
        self.scores.push(validation.score);
        self.current_problem_index += 1;
        if self.is_complete() {
            self.end_time = Some(Utc::now());
        }
        Ok(validation)
    }

    pub fn is_complete(&self) -> bool {
        self.current_problem_index >= self.problems.len()
    }

    /// Number of problems answered so far.
    pub fn answered(&self) -> usize {
        self.scores.len()
    }

    /// Mean score of answered problems, 0 before any answer.
    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<f64>() / self.scores.len() as f64
        }
    }
}

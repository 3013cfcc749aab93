//! Core data model types for mathdrill.
//!
//! Topics, difficulty tiers, generated problems, and answer validations.
//! Field names serialize in camelCase so snapshots read as flat documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DrillError;

/// Subject area a problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    Fractions,
    Algebra,
    Geometry,
    WordProblems,
    Decimals,
    Percentages,
    Integers,
    Measurement,
}

impl Topic {
    /// Every topic, in catalog order.
    pub const ALL: [Topic; 8] = [
        Topic::Fractions,
        Topic::Algebra,
        Topic::Geometry,
        Topic::WordProblems,
        Topic::Decimals,
        Topic::Percentages,
        Topic::Integers,
        Topic::Measurement,
    ];

    /// Stable identifier, as used in snapshots and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Fractions => "fractions",
            Topic::Algebra => "algebra",
            Topic::Geometry => "geometry",
            Topic::WordProblems => "word-problems",
            Topic::Decimals => "decimals",
            Topic::Percentages => "percentages",
            Topic::Integers => "integers",
            Topic::Measurement => "measurement",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Topic::Fractions => "Fractions",
            Topic::Algebra => "Algebra",
            Topic::Geometry => "Geometry",
            Topic::WordProblems => "Word Problems",
            Topic::Decimals => "Decimals",
            Topic::Percentages => "Percentages",
            Topic::Integers => "Integers",
            Topic::Measurement => "Measurement",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Topic::Fractions => "Learn to add, subtract, multiply, and divide fractions",
            Topic::Algebra => "Solve equations and work with variables",
            Topic::Geometry => "Explore shapes, angles, and spatial relationships",
            Topic::WordProblems => "Apply math skills to real-world scenarios",
            Topic::Decimals => "Work with decimal numbers and place values",
            Topic::Percentages => "Calculate percentages and solve percent problems",
            Topic::Integers => "Work with positive and negative whole numbers",
            Topic::Measurement => "Convert units and solve measurement problems",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Topic::Fractions => "🍕",
            Topic::Algebra => "📐",
            Topic::Geometry => "🔷",
            Topic::WordProblems => "📖",
            Topic::Decimals => "🔢",
            Topic::Percentages => "📊",
            Topic::Integers => "➕➖",
            Topic::Measurement => "📏",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fractions" | "fraction" => Ok(Topic::Fractions),
            "algebra" => Ok(Topic::Algebra),
            "geometry" => Ok(Topic::Geometry),
            "word-problems" | "word_problems" | "word" => Ok(Topic::WordProblems),
            "decimals" => Ok(Topic::Decimals),
            "percentages" | "percent" => Ok(Topic::Percentages),
            "integers" => Ok(Topic::Integers),
            "measurement" => Ok(Topic::Measurement),
            other => Err(DrillError::UnknownTopic(other.to_string())),
        }
    }
}

/// Difficulty tier. Ordered: easy < medium < hard.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DrillError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Presentation hint for how a problem should be answered. Not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    MultipleChoice,
    FillInBlank,
    DragDrop,
    NumberInput,
    EquationInput,
}

/// The canonical answer to a problem: a number or a canonical string such as
/// a fraction in lowest terms (`"3/4"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
}

impl Answer {
    /// Numeric value, if this is a number answer.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(_) => None,
        }
    }

    /// Integer value, if this is a whole-number answer.
    pub fn as_integer(&self) -> Option<i64> {
        self.as_number()
            .filter(|n| n.is_finite() && n.fract() == 0.0)
            .map(|n| n as i64)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => write!(f, "{n}"),
            Answer::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Answer::Number(n as f64)
    }
}

impl From<f64> for Answer {
    fn from(n: f64) -> Self {
        Answer::Number(n)
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

/// A generated math problem. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Unique identifier for this problem.
    pub id: String,
    pub topic: Topic,
    pub difficulty: Difficulty,
    /// The question shown to the learner.
    pub question: String,
    /// How the answer should be collected.
    #[serde(rename = "type")]
    pub kind: ProblemKind,
    pub correct_answer: Answer,
    /// Choices for multiple-choice problems, already shuffled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
    /// Worked solution, consistent with `correct_answer`.
    pub explanation: String,
}

/// Result of comparing a learner's answer to a problem's correct answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerValidation {
    pub is_correct: bool,
    /// The learner's answer as entered.
    pub user_answer: String,
    pub correct_answer: Answer,
    /// Numeric tolerance applied, if the comparison was numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    pub explanation: String,
    /// Score on a 0–100 scale.
    pub score: f64,
}

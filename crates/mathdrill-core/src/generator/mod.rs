//! Problem generators, one family per topic.
//!
//! Every generator implements [`ProblemGenerator`] and draws all randomness
//! from the [`RandomSource`] it is handed. The [`GeneratorRegistry`] maps
//! topics to generators; topics without a built-in family (decimals,
//! percentages, integers, measurement) can be served by registering a custom
//! generator that honors the same [`Problem`] contract.

pub mod algebra;
pub mod fractions;
pub mod geometry;
pub mod word;

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::DrillError;
use crate::model::{Difficulty, Problem, ProblemKind, Topic};
use crate::numeric::{shuffle, wrong_answers};
use crate::random::{RandomSource, RngSource};

pub use algebra::AlgebraGenerator;
pub use fractions::FractionGenerator;
pub use geometry::GeometryGenerator;
pub use word::WordProblemGenerator;

/// A family of problems for one topic.
pub trait ProblemGenerator: Send + Sync {
    /// The topic this generator produces problems for.
    fn topic(&self) -> Topic;

    /// Generate one problem at the requested difficulty.
    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem;
}

/// Topic → generator lookup.
pub struct GeneratorRegistry {
    generators: BTreeMap<Topic, Box<dyn ProblemGenerator>>,
}

impl GeneratorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// A registry with the fractions, algebra, geometry, and word-problem
    /// families.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FractionGenerator));
        registry.register(Box::new(AlgebraGenerator));
        registry.register(Box::new(GeometryGenerator));
        registry.register(Box::new(WordProblemGenerator));
        registry
    }

    /// Register a generator for its topic, returning any generator it replaced.
    pub fn register(
        &mut self,
        generator: Box<dyn ProblemGenerator>,
    ) -> Option<Box<dyn ProblemGenerator>> {
        self.generators.insert(generator.topic(), generator)
    }

    pub fn supports(&self, topic: Topic) -> bool {
        self.generators.contains_key(&topic)
    }

    /// Topics with a registered generator, in catalog order.
    pub fn topics(&self) -> Vec<Topic> {
        self.generators.keys().copied().collect()
    }

    /// Generate a problem, failing if nothing is registered for `topic`.
    pub fn generate(
        &self,
        topic: Topic,
        difficulty: Difficulty,
        rng: &mut dyn RandomSource,
    ) -> Result<Problem, DrillError> {
        let generator = self
            .generators
            .get(&topic)
            .ok_or(DrillError::NoGenerator(topic))?;
        let problem = generator.generate(difficulty, rng);
        tracing::debug!(
            id = %problem.id,
            %topic,
            %difficulty,
            "generated problem"
        );
        Ok(problem)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Generate a problem with the built-in families and an entropy-seeded source.
pub fn generate(topic: Topic, difficulty: Difficulty) -> Result<Problem, DrillError> {
    let mut rng = RngSource::from_entropy();
    GeneratorRegistry::with_builtin().generate(topic, difficulty, &mut rng)
}

/// Unique problem id with a family prefix, e.g. `algebra-linear-<uuid>`.
pub(crate) fn problem_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

/// Turn a whole-number problem into a multiple-choice one.
///
/// Adds `count` distinct distractors within `±range` of the answer and
/// shuffles them together with the correct answer. Problems whose answer is
/// not a whole number are returned unchanged.
pub fn attach_choices(
    mut problem: Problem,
    rng: &mut dyn RandomSource,
    count: usize,
    range: i64,
) -> Problem {
    let Some(correct) = problem.correct_answer.as_integer() else {
        return problem;
    };
    let mut options: Vec<i64> = wrong_answers(rng, correct, count, range);
    options.push(correct);
    shuffle(rng, &mut options);

    problem.options = Some(options.iter().map(|o| o.to_string()).collect());
    problem.kind = ProblemKind::MultipleChoice;
    problem
}

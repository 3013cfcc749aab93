//! Area of rectangles, triangles, and circles.
//!
//! Circles only appear above easy. Circle areas use π ≈ 3.14 and are rounded
//! to two decimal places; a grader must use the same constant to match.

use crate::model::{Answer, Difficulty, Problem, ProblemKind, Topic};
use crate::numeric::round_to;
use crate::random::RandomSource;

use super::{problem_id, ProblemGenerator};

/// The π approximation circle answers are computed with.
pub const PI_APPROX: f64 = 3.14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle,
    Triangle,
    Circle,
}

impl Shape {
    const ALL: [Shape; 3] = [Shape::Rectangle, Shape::Triangle, Shape::Circle];

    /// Shapes available at a difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> &'static [Shape] {
        match difficulty {
            Difficulty::Easy => &Self::ALL[..2],
            Difficulty::Medium | Difficulty::Hard => &Self::ALL,
        }
    }
}

pub struct GeometryGenerator;

impl ProblemGenerator for GeometryGenerator {
    fn topic(&self) -> Topic {
        Topic::Geometry
    }

    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
        area(difficulty, rng)
    }
}

/// `3.14 × r²`, rounded to 2 decimal places.
pub fn circle_area(radius: i64) -> f64 {
    round_to(PI_APPROX * (radius * radius) as f64, 2)
}

pub fn area(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("geometry-area");

    let shapes = Shape::for_difficulty(difficulty);
    let shape = shapes[rng.next_int(0, shapes.len() as i64 - 1) as usize];

    let (question, answer, explanation, hint) = match shape {
        Shape::Rectangle => {
            let length = rng.next_int(3, 15);
            let width = rng.next_int(3, 12);
            let answer = (length * width) as f64;
            (
                format!(
                    "What is the area of a rectangle with length {length} units and width {width} units?"
                ),
                answer,
                format!(
                    "The area of a rectangle is length × width = {length} × {width} = {answer} square units."
                ),
                "Area of a rectangle = length × width.",
            )
        }
        Shape::Triangle => {
            let base = rng.next_int(4, 16);
            let height = rng.next_int(3, 12);
            let answer = (base * height) as f64 / 2.0;
            (
                format!(
                    "What is the area of a triangle with base {base} units and height {height} units?"
                ),
                answer,
                format!(
                    "The area of a triangle is (base × height) ÷ 2 = ({base} × {height}) ÷ 2 = {answer} square units."
                ),
                "A triangle is half of a rectangle with the same base and height.",
            )
        }
        Shape::Circle => {
            let radius = rng.next_int(2, 8);
            let answer = circle_area(radius);
            (
                format!(
                    "What is the area of a circle with radius {radius} units? (Use π ≈ 3.14, round to 2 decimal places)"
                ),
                answer,
                format!(
                    "The area of a circle is πr² = 3.14 × {radius}² = 3.14 × {} = {answer} square units.",
                    radius * radius
                ),
                "Area of a circle = π × radius × radius.",
            )
        }
    };

    Problem {
        id,
        topic: Topic::Geometry,
        difficulty,
        question,
        kind: ProblemKind::NumberInput,
        correct_answer: Answer::Number(answer),
        options: None,
        hints: Some(vec![hint.to_string()]),
        explanation,
    }
}

//! Linear equations in one variable.
//!
//! - easy: `x + a = b`
//! - medium: `ax + b = c` with `a >= 2`
//! - hard: `ax + b = cx + d` with `a > c`, so `a - c` is never zero

use crate::model::{Answer, Difficulty, Problem, ProblemKind, Topic};
use crate::random::RandomSource;

use super::{problem_id, ProblemGenerator};

pub struct AlgebraGenerator;

impl ProblemGenerator for AlgebraGenerator {
    fn topic(&self) -> Topic {
        Topic::Algebra
    }

    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
        linear_equation(difficulty, rng)
    }
}

/// `"x"` for a unit coefficient, `"{coef}x"` otherwise.
fn term(coef: i64) -> String {
    if coef == 1 {
        "x".to_string()
    } else {
        format!("{coef}x")
    }
}

pub fn linear_equation(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("algebra-linear");

    let (equation, x, explanation, hints) = match difficulty {
        Difficulty::Easy => {
            let a = rng.next_int(1, 20);
            let x = rng.next_int(1, 15);
            let b = x + a;

            let equation = format!("x + {a} = {b}");
            let explanation = format!(
                "To solve {equation}, subtract {a} from both sides: x = {b} - {a} = {x}."
            );
            (equation, x, explanation, vec!["Undo the addition."])
        }
        Difficulty::Medium => {
            let a = rng.next_int(2, 8);
            let b = rng.next_int(1, 15);
            let x = rng.next_int(1, 10);
            let c = a * x + b;

            let equation = format!("{a}x + {b} = {c}");
            let explanation = format!(
                "To solve {equation}, first subtract {b} from both sides: {a}x = {}. \
                 Then divide by {a}: x = {} ÷ {a} = {x}.",
                c - b,
                c - b
            );
            (
                equation,
                x,
                explanation,
                vec!["Move the constant first.", "Then divide by the coefficient."],
            )
        }
        Difficulty::Hard => {
            let c = rng.next_int(2, 5);
            let a = rng.next_int(c + 1, 6);
            let x = rng.next_int(1, 8);
            let b = rng.next_int(1, 10);
            let coef = a - c;
            let d = coef * x + b;

            let equation = format!("{a}x + {b} = {c}x + {d}");
            let explanation = format!(
                "To solve {equation}, first subtract {c}x from both sides: {} + {b} = {d}. \
                 Then subtract {b}: {} = {}. Finally divide by {coef}: x = {} ÷ {coef} = {x}.",
                term(coef),
                term(coef),
                d - b,
                d - b
            );
            (
                equation,
                x,
                explanation,
                vec![
                    "Collect the x terms on one side.",
                    "Move the constant, then divide by the coefficient.",
                ],
            )
        }
    };

    Problem {
        id,
        topic: Topic::Algebra,
        difficulty,
        question: format!("Solve for x: {equation}"),
        kind: ProblemKind::NumberInput,
        correct_answer: Answer::from(x),
        options: None,
        hints: Some(hints.into_iter().map(String::from).collect()),
        explanation,
    }
}

//! Answer checking.
//!
//! Compares a learner's raw input against a problem's canonical answer.
//! Numbers compare within a tolerance; fraction answers compare as reduced
//! rationals. Input that cannot be read as a number, or reads as a non-finite
//! one, is simply incorrect.

use crate::model::{Answer, AnswerValidation, Problem};
use crate::numeric::{reduce_fraction, Fraction};

/// Default tolerance for numeric answers.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Score awarded for a correct answer. Incorrect answers score zero.
pub const FULL_SCORE: f64 = 100.0;

/// Parse a learner's numeric input. Accepts a leading `$`, thousands
/// separators, and surrounding whitespace. Rejects NaN and infinities.
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parse `"n/d"` or a whole number `"n"`. Zero denominators are rejected.
///
/// `i64::MIN` has no positive counterpart, so it is rejected in either
/// position to keep reduction overflow-free.
pub fn parse_fraction(input: &str) -> Option<Fraction> {
    let input = input.trim();
    let (n, d) = match input.split_once('/') {
        Some((n, d)) => (n.trim().parse::<i64>().ok()?, d.trim().parse::<i64>().ok()?),
        None => (input.parse::<i64>().ok()?, 1),
    };
    (d != 0 && n != i64::MIN && d != i64::MIN).then(|| Fraction::new(n, d))
}

/// Whether `actual` is within `tolerance` of `expected`, with a little slack
/// for binary rounding of values like 78.49.
pub fn within_tolerance(actual: f64, expected: f64, tolerance: f64) -> bool {
    let slack = f64::EPSILON * expected.abs().max(1.0) * 16.0;
    (actual - expected).abs() <= tolerance + slack
}

fn normalize_text(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Validate `input` against `problem`'s correct answer.
pub fn validate_answer(problem: &Problem, input: &str, tolerance: f64) -> AnswerValidation {
    let (is_correct, used_tolerance, readable) = match &problem.correct_answer {
        Answer::Number(expected) => match parse_number(input) {
            Some(value) => (within_tolerance(value, *expected, tolerance), Some(tolerance), true),
            None => (false, Some(tolerance), false),
        },
        Answer::Text(expected) => match parse_fraction(expected) {
            Some(expected) => {
                let expected = expected.reduced();
                if let Some(given) = parse_fraction(input) {
                    let given = reduce_fraction(given.numerator, given.denominator);
                    (given == expected, None, true)
                } else if let Some(value) = parse_number(input) {
                    (
                        within_tolerance(value, expected.value(), tolerance),
                        Some(tolerance),
                        true,
                    )
                } else {
                    (false, None, false)
                }
            }
            None => (normalize_text(input) == normalize_text(expected), None, true),
        },
    };

    let explanation = if is_correct {
        format!("Correct! {}", problem.explanation)
    } else if !readable {
        format!(
            "Could not read '{}' as an answer. The correct answer is {}. {}",
            input.trim(),
            problem.correct_answer,
            problem.explanation
        )
    } else {
        format!(
            "Not quite. The correct answer is {}. {}",
            problem.correct_answer, problem.explanation
        )
    };

    AnswerValidation {
        is_correct,
        user_answer: input.trim().to_string(),
        correct_answer: problem.correct_answer.clone(),
        tolerance: used_tolerance,
        explanation,
        score: if is_correct { FULL_SCORE } else { 0.0 },
    }
}

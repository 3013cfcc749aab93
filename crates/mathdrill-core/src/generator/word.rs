//! Word problems.
//!
//! A scenario is drawn at random. Shopping problems compute a total cost,
//! with sales tax only at hard. Every other scenario is a single addition or
//! subtraction dressed in that scenario's wording.

use crate::model::{Answer, Difficulty, Problem, ProblemKind, Topic};
use crate::numeric::{random_decimal, round_to};
use crate::random::RandomSource;

use super::{problem_id, ProblemGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Shopping,
    Travel,
    Cooking,
    Sports,
    School,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Shopping,
        Scenario::Travel,
        Scenario::Cooking,
        Scenario::Sports,
        Scenario::School,
    ];
}

pub struct WordProblemGenerator;

impl ProblemGenerator for WordProblemGenerator {
    fn topic(&self) -> Topic {
        Topic::WordProblems
    }

    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
        let scenario = Scenario::ALL[rng.next_int(0, Scenario::ALL.len() as i64 - 1) as usize];
        scenario_problem(scenario, difficulty, rng)
    }
}

/// Generate a word problem for a specific scenario.
pub fn scenario_problem(
    scenario: Scenario,
    difficulty: Difficulty,
    rng: &mut dyn RandomSource,
) -> Problem {
    match scenario {
        Scenario::Shopping => shopping(difficulty, rng),
        other => add_or_subtract(other, difficulty, rng),
    }
}

pub fn shopping(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("word-problem");

    let price = random_decimal(rng, 5.0, 50.0, 2);
    let quantity = rng.next_int(2, 8);
    let tax = if difficulty == Difficulty::Hard {
        random_decimal(rng, 0.05, 0.1, 3)
    } else {
        0.0
    };

    let subtotal = round_to(price * quantity as f64, 2);

    let (total, question, explanation, hints) = if tax > 0.0 {
        let tax_amount = round_to(subtotal * tax, 2);
        let total = round_to(subtotal + tax_amount, 2);
        (
            total,
            format!(
                "Sarah buys {quantity} items at ${price:.2} each. If there's a {:.1}% tax, what is the total cost?",
                tax * 100.0
            ),
            format!(
                "First calculate the subtotal: {quantity} × ${price:.2} = ${subtotal:.2}. \
                 Then add tax: ${subtotal:.2} × {:.1}% = ${tax_amount:.2}. \
                 Total: ${subtotal:.2} + ${tax_amount:.2} = ${total:.2}.",
                tax * 100.0
            ),
            vec![
                "Multiply the price by the quantity first.",
                "Then add the tax on top of the subtotal. Round to the nearest cent.",
            ],
        )
    } else {
        (
            subtotal,
            format!("Sarah buys {quantity} items at ${price:.2} each. What is the total cost?"),
            format!("Total cost = quantity × price = {quantity} × ${price:.2} = ${subtotal:.2}."),
            vec!["Multiply the price by the quantity."],
        )
    };

    Problem {
        id,
        topic: Topic::WordProblems,
        difficulty,
        question,
        kind: ProblemKind::NumberInput,
        correct_answer: Answer::Number(total),
        options: None,
        hints: Some(hints.into_iter().map(String::from).collect()),
        explanation,
    }
}

/// Phrasing for one scenario: (addition question, subtraction question, unit).
fn phrasing(scenario: Scenario, a: i64, b: i64) -> (String, String, &'static str) {
    match scenario {
        Scenario::Travel => (
            format!(
                "A bus travels {a} miles in the morning and {b} miles in the afternoon. \
                 How many miles does it travel in total?"
            ),
            format!(
                "A road trip is {a} miles long. After driving {b} miles, how many miles are left?"
            ),
            "miles",
        ),
        Scenario::Cooking => (
            format!("A baker makes {a} cookies and then bakes {b} more. How many cookies are there now?"),
            format!("A baker has {a} cookies and sells {b}. How many cookies are left?"),
            "cookies",
        ),
        Scenario::Sports => (
            format!(
                "A team scores {a} points in the first half and {b} points in the second half. \
                 How many points does it score in total?"
            ),
            format!(
                "A team needs {a} points to win and has scored {b}. How many more points does it need?"
            ),
            "points",
        ),
        Scenario::School | Scenario::Shopping => (
            format!("Tom has {a} marbles and receives {b} more. How many marbles does he have now?"),
            format!("Lisa has {a} stickers and gives away {b}. How many stickers does she have left?"),
            "",
        ),
    }
}

fn add_or_subtract(scenario: Scenario, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("word-problem");

    let mut a = rng.next_int(10, 100);
    let mut b = rng.next_int(5, 50);
    let addition = rng.coin_flip();
    if !addition && b > a {
        std::mem::swap(&mut a, &mut b);
    }

    let (add_q, sub_q, unit) = phrasing(scenario, a, b);
    let (question, answer, explanation) = if addition {
        let unit = if unit.is_empty() { "marbles" } else { unit };
        (add_q, a + b, format!("{a} + {b} = {} {unit}.", a + b))
    } else {
        let unit = if unit.is_empty() { "stickers" } else { unit };
        (sub_q, a - b, format!("{a} - {b} = {} {unit}.", a - b))
    };

    Problem {
        id,
        topic: Topic::WordProblems,
        difficulty,
        question,
        kind: ProblemKind::NumberInput,
        correct_answer: Answer::from(answer),
        options: None,
        hints: Some(vec![if addition {
            "Does the amount grow or shrink? Here it grows, so add.".to_string()
        } else {
            "Does the amount grow or shrink? Here it shrinks, so subtract.".to_string()
        }]),
        explanation,
    }
}

//! Fraction addition and multiplication.
//!
//! Easy addition keeps a shared denominator; medium and hard add fractions
//! with different denominators through an explicit LCD. Multiplication uses
//! two proper fractions at easy and an improper first factor above that.
//! Answers are canonical fraction strings in lowest terms.

use crate::model::{Answer, Difficulty, Problem, ProblemKind, Topic};
use crate::numeric::{
    format_fraction, lcm, random_improper_fraction, random_proper_fraction, Fraction,
};
use crate::random::RandomSource;

use super::{problem_id, ProblemGenerator};

/// Picks addition or multiplication with equal odds.
pub struct FractionGenerator;

impl ProblemGenerator for FractionGenerator {
    fn topic(&self) -> Topic {
        Topic::Fractions
    }

    fn generate(&self, difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
        if rng.coin_flip() {
            addition(difficulty, rng)
        } else {
            multiplication(difficulty, rng)
        }
    }
}

/// `n/d` exactly as written, without reducing.
fn raw(f: Fraction) -> String {
    format!("{}/{}", f.numerator, f.denominator)
}

/// `" = {answer}"` when the raw result simplifies to something shorter.
fn simplified_suffix(raw_result: &str, answer: &str) -> String {
    if raw_result == answer {
        String::new()
    } else {
        format!(" = {answer}")
    }
}

pub fn addition(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("fraction-add");

    let (question, answer, explanation, hint) = if difficulty == Difficulty::Easy {
        let denominator = rng.next_int(2, 10);
        let n1 = rng.next_int(1, denominator - 1);
        let n2 = rng.next_int(1, denominator - n1);
        let sum = n1 + n2;
        let answer = format_fraction(sum, denominator);
        let sum_text = format!("{sum}/{denominator}");

        let question = format!("What is {n1}/{denominator} + {n2}/{denominator}?");
        let explanation = format!(
            "Since both fractions have the same denominator ({denominator}), add the numerators: \
             {n1} + {n2} = {sum}. So the sum is {sum_text}{}.",
            simplified_suffix(&sum_text, &answer)
        );
        (
            question,
            answer,
            explanation,
            "The denominators already match, so only the numerators change.",
        )
    } else {
        let f1 = random_proper_fraction(rng);
        // Draw from [2, 11] and skip over f1's denominator so the two differ.
        let mut d2 = rng.next_int(2, 11);
        if d2 >= f1.denominator {
            d2 += 1;
        }
        let f2 = Fraction::new(rng.next_int(1, d2 - 1), d2);

        let lcd = lcm(f1.denominator, f2.denominator);
        let m1 = f1.numerator * (lcd / f1.denominator);
        let m2 = f2.numerator * (lcd / f2.denominator);
        let sum = m1 + m2;
        let answer = format_fraction(sum, lcd);
        let sum_text = format!("{sum}/{lcd}");

        let question = format!("What is {} + {}?", raw(f1), raw(f2));
        let explanation = format!(
            "First, find a common denominator. The LCD of {} and {} is {lcd}. \
             Convert: {} = {m1}/{lcd} and {} = {m2}/{lcd}. \
             Then add: {m1}/{lcd} + {m2}/{lcd} = {sum_text}{}.",
            f1.denominator,
            f2.denominator,
            raw(f1),
            raw(f2),
            simplified_suffix(&sum_text, &answer)
        );
        (
            question,
            answer,
            explanation,
            "Find the least common denominator before adding.",
        )
    };

    Problem {
        id,
        topic: Topic::Fractions,
        difficulty,
        question,
        kind: ProblemKind::FillInBlank,
        correct_answer: Answer::Text(answer),
        options: None,
        hints: Some(vec![
            hint.to_string(),
            "Write your answer in lowest terms.".to_string(),
        ]),
        explanation,
    }
}

pub fn multiplication(difficulty: Difficulty, rng: &mut dyn RandomSource) -> Problem {
    let id = problem_id("fraction-mult");

    let f1 = if difficulty == Difficulty::Easy {
        random_proper_fraction(rng)
    } else {
        random_improper_fraction(rng)
    };
    let f2 = random_proper_fraction(rng);

    let product_num = f1.numerator * f2.numerator;
    let product_den = f1.denominator * f2.denominator;
    let answer = format_fraction(product_num, product_den);
    let product_text = format!("{product_num}/{product_den}");

    let question = format!("What is {} × {}?", raw(f1), raw(f2));
    let explanation = format!(
        "To multiply fractions, multiply the numerators together and the denominators together: \
         ({} × {}) / ({} × {}) = {product_text}{}.",
        f1.numerator,
        f2.numerator,
        f1.denominator,
        f2.denominator,
        simplified_suffix(&product_text, &answer)
    );

    Problem {
        id,
        topic: Topic::Fractions,
        difficulty,
        question,
        kind: ProblemKind::FillInBlank,
        correct_answer: Answer::Text(answer),
        options: None,
        hints: Some(vec![
            "Multiply straight across, then simplify.".to_string(),
        ]),
        explanation,
    }
}

//! Shared numeric helpers: sampling, GCD/LCM, fractions, and multiple-choice
//! distractors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Greatest common divisor by Euclid's algorithm. Always non-negative.
pub fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple, `a*b / gcd(a, b)`. Zero if either input is zero.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a * b).abs() / gcd(a, b)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Format a ratio (0.0–1.0) as a percentage string, e.g. `0.875` → `"87.5%"`.
pub fn format_percentage(ratio: f64, places: usize) -> String {
    format!("{:.*}%", places, ratio * 100.0)
}

/// Sample a decimal in `[min, max)` rounded to `places` decimal places.
pub fn random_decimal(rng: &mut dyn RandomSource, min: f64, max: f64, places: u32) -> f64 {
    round_to(rng.next_float() * (max - min) + min, places)
}

/// A fraction with an integer numerator and non-zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Lowest terms, with any sign carried on the numerator.
    pub fn reduced(&self) -> Fraction {
        reduce_fraction(self.numerator, self.denominator)
    }

    pub fn is_lowest_terms(&self) -> bool {
        self.denominator == 1 || gcd(self.numerator, self.denominator) == 1
    }

    pub fn is_proper(&self) -> bool {
        self.numerator.abs() < self.denominator.abs()
    }

    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_fraction(self.numerator, self.denominator))
    }
}

/// Divide numerator and denominator by their GCD.
pub fn reduce_fraction(numerator: i64, denominator: i64) -> Fraction {
    let divisor = gcd(numerator, denominator);
    if divisor == 0 {
        return Fraction::new(numerator, denominator);
    }
    let (mut n, mut d) = (numerator / divisor, denominator / divisor);
    if d < 0 {
        n = -n;
        d = -d;
    }
    Fraction::new(n, d)
}

/// Canonical text for a fraction: `"0"` for a zero numerator, a whole number
/// when the reduced denominator is 1, otherwise `"n/d"` in lowest terms.
pub fn format_fraction(numerator: i64, denominator: i64) -> String {
    if numerator == 0 {
        return "0".to_string();
    }
    let reduced = reduce_fraction(numerator, denominator);
    if reduced.denominator == 1 {
        reduced.numerator.to_string()
    } else {
        format!("{}/{}", reduced.numerator, reduced.denominator)
    }
}

/// A proper fraction with denominator in `[2, 12]`. Not necessarily reduced.
pub fn random_proper_fraction(rng: &mut dyn RandomSource) -> Fraction {
    let denominator = rng.next_int(2, 12);
    let numerator = rng.next_int(1, denominator - 1);
    Fraction::new(numerator, denominator)
}

/// An improper fraction with denominator in `[2, 12]` and numerator in
/// `[d + 1, 3d]`.
pub fn random_improper_fraction(rng: &mut dyn RandomSource) -> Fraction {
    let denominator = rng.next_int(2, 12);
    let numerator = rng.next_int(denominator + 1, denominator * 3);
    Fraction::new(numerator, denominator)
}

/// Fisher–Yates shuffle in place.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_int(0, i as i64) as usize;
        items.swap(i, j);
    }
}

/// Distinct wrong answers within `±range` of `correct`, in draw order.
///
/// Offsets of zero and repeats are redrawn. `count` is capped at `2 * range`,
/// the number of distinct non-zero offsets available.
pub fn wrong_answers(
    rng: &mut dyn RandomSource,
    correct: i64,
    count: usize,
    range: i64,
) -> Vec<i64> {
    let range = range.max(0);
    let count = count.min(2 * range as usize);
    let mut wrong = Vec::with_capacity(count);
    while wrong.len() < count {
        let candidate = correct + rng.next_int(-range, range);
        if candidate != correct && !wrong.contains(&candidate) {
            wrong.push(candidate);
        }
    }
    wrong
}

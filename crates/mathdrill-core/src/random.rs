//! Injectable randomness for problem generation.
//!
//! Generators never touch a global RNG. They draw from a [`RandomSource`],
//! so a seeded source reproduces the same problems and tests can script
//! exact draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The randomness capability generators depend on.
pub trait RandomSource {
    /// Uniform integer in `[min, max]`, both ends inclusive.
    fn next_int(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f64;

    /// Unweighted coin flip.
    fn coin_flip(&mut self) -> bool {
        self.next_float() >= 0.5
    }
}

/// A [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Deterministic source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "empty range [{min}, {max}]");
        self.rng.gen_range(min..=max)
    }

    fn next_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays scripted draws, failing loudly when a draw falls outside the
/// requested range or the script runs out.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    ints: std::collections::VecDeque<i64>,
    floats: std::collections::VecDeque<f64>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(ints: &[i64], floats: &[f64]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            floats: floats.iter().copied().collect(),
        }
    }

    pub(crate) fn ints(ints: &[i64]) -> Self {
        Self::new(ints, &[])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        let value = self.ints.pop_front().expect("scripted ints exhausted");
        assert!(
            (min..=max).contains(&value),
            "scripted int {value} outside [{min}, {max}]"
        );
        value
    }

    fn next_float(&mut self) -> f64 {
        self.floats.pop_front().expect("scripted floats exhausted")
    }
}

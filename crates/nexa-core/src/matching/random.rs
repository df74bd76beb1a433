//! Injectable randomness for demo-mode match simulation.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform draws the matching engine needs.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// OS-seeded generator for production use.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

/// Replays pre-recorded draws, for forcing either outcome in tests and demos.
///
/// Once a queue runs dry, unit draws return `1.0` (never below any match
/// probability) and index draws return `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(units: impl IntoIterator<Item = f64>, indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            units: units.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Only unit draws; index draws fall back to `0`.
    pub fn draws(units: impl IntoIterator<Item = f64>) -> Self {
        Self::new(units, std::iter::empty::<usize>())
    }

    /// Every unit draw succeeds.
    pub fn always_match() -> Self {
        Self::draws(std::iter::repeat_n(0.0, 64))
    }

    /// Every unit draw fails.
    pub fn never_match() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(1.0)
    }

    fn next_index(&mut self, upper: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % upper
    }
}

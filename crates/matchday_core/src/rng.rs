//! Random sources for the match engine
//!
//! Every sampling site in the engine (tie-breaks, roulette draws, side picks,
//! player picks) goes through [`RandomSource`]. A match owns exactly one source,
//! so a seeded run is fully reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..n`. Returns 0 when `n == 0`.
    fn next_index(&mut self, n: usize) -> usize;

    fn next_bool(&mut self) -> bool;
}

// ============================================================================
// Seeded ChaCha source
// ============================================================================

/// Deterministic source backed by ChaCha8 (same seed = same match).
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    fn next_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

// ============================================================================
// Scripted source (tests, replays of hand-picked draws)
// ============================================================================

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many values have been consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 1.0)
    }

    fn next_index(&mut self, n: usize) -> usize {
        let v = self.next_f64();
        if n == 0 {
            return 0;
        }
        ((v * n as f64).floor() as usize).min(n - 1)
    }

    fn next_bool(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

// ========== Tests ==========

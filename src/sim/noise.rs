//! Random source for wall-bounce jitter
//!
//! The ball draws a small horizontal perturbation every time it bounces off
//! a side wall. The source is a type parameter of the model so tests can
//! substitute a constant and replays can use a fixed seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform samples over a closed interval
pub trait NoiseSource {
    /// Sample a value in `[min, max]`. Returns `min` when the range is empty.
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// PCG-backed noise; the same seed always yields the same sequence
#[derive(Debug, Clone)]
pub struct SeededNoise {
    seed: u64,
    rng: Pcg32,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl NoiseSource for SeededNoise {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        if !(min < max) {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Always yields the same value, clamped into the requested range
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedNoise(pub f32);

impl NoiseSource for FixedNoise {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        crate::constrain(self.0, min, max)
    }
}

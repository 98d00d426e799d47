//! Seeded random stream for obstacle placement
//!
//! Same seed, same call count, same value. Nothing here is cryptographic.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A stream of uniform values in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

/// PCG-backed generator used by the engine
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }
}

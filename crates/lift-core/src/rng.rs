//! Deterministic RNG wrapper for manifest generation.
//!
//! The simulation itself never draws random numbers; only synthetic
//! passenger feeds do.  The same seed always produces the same manifest.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG used for synthetic manifests and randomized tests.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

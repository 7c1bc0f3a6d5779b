//! Random number generation for level assembly
//!
//! Uses a seeded ChaCha RNG for reproducibility. The placement code only
//! ever sees the [`RandomSource`] trait; callers own the generator.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Source of raw random draws injected into placement calls
pub trait RandomSource {
    /// Next uniformly distributed unsigned integer
    fn next_uint(&mut self) -> u32;
}

/// Level generator random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Serializes as its seed only, so a report can name the run it came from.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only the seed
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_uint(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

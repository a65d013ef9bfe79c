//! Seedable randomness service.
//!
//! Every stochastic computation in the engine draws from this single source,
//! so a fixed seed reproduces a whole campaign. The generator serializes
//! with the game state, which keeps replay exact across save boundaries.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RngService {
    rng: ChaCha8Rng,
}

impl RngService {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Gaussian draw. Falls back to the mean when sigma is not usable.
    pub fn gauss(&mut self, mu: f32, sigma: f32) -> f32 {
        match Normal::new(mu as f64, sigma as f64) {
            Ok(dist) => dist.sample(&mut self.rng) as f32,
            Err(_) => mu,
        }
    }

    /// Bernoulli draw with probability `p`, clamped to [0, 1].
    pub fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f32>() < p
    }

    /// Uniform draw from [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Uniform index into a slice of the given length.
    pub fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

// ============================================================
// RANDOM SOURCE
// ============================================================
// Injectable integer source for placeholder mention counts

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync {
    /// Random integer in `low..=high`. Implementations return `low` when `high < low`.
    fn next_in_range(&self, low: u32, high: u32) -> u32;
}

/// Unseeded source backed by the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        rand::rng().random_range(low..=high)
    }
}

/// Reproducible source for fixed-seed runs
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(low..=high)
    }
}

//! Injectable randomness for the fallback generator and canned replies.
//!
//! Every random decision (option shuffles, true/false polarity, canned reply
//! choice) goes through [`RandomSource`], so tests can pin outcomes with a
//! seeded source or a mock.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random draws used during generation.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..bound`. `bound` is always non-zero.
    fn next_index(&self, bound: usize) -> usize;

    /// Uniform boolean.
    fn next_bool(&self) -> bool;
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], random: &R) {
    for i in (1..items.len()).rev() {
        let j = random.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Random source backed by a [`StdRng`].
///
/// [`StdRandom::from_os`] seeds from the operating system;
/// [`StdRandom::seeded`] gives a reproducible sequence.
pub struct StdRandom {
    rng: Mutex<StdRng>,
}

impl StdRandom {
    pub fn from_os() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_os()
    }
}

impl RandomSource for StdRandom {
    fn next_index(&self, bound: usize) -> usize {
        self.rng.lock().random_range(0..bound)
    }

    fn next_bool(&self) -> bool {
        self.rng.lock().random_bool(0.5)
    }
}

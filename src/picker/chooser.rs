use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::{Mutex, PoisonError};

/// Source of the index used to pick among the top articles.
pub trait IndexChooser: Send + Sync {
    /// Return an index in `[0, upper)`. Callers guarantee `upper > 0`.
    fn choose(&self, upper: usize) -> usize;
}

/// Process-wide generator, seeded once and shared by all requests.
pub struct SharedRng {
    rng: Mutex<StdRng>,
}

impl SharedRng {
    pub fn from_os_rng() -> Self {
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

impl Default for SharedRng {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl IndexChooser for SharedRng {
    fn choose(&self, upper: usize) -> usize {
        // A panic mid-draw cannot leave StdRng in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..upper)
    }
}

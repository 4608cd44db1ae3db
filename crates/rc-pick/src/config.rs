//! Configuration for a picker session.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Configuration for a picker session.
#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
    /// RNG seed for reproducible picks. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl PickerConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the RNG described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

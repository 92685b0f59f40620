use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;


/// Seeded random source handed to the maze algorithms.
///
/// Pcg64 seeded through `seed_from_u64` gives the same stream for a seed on every platform,
/// so a seed is enough to share a maze.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: Pcg64,
}

impl Randomizer {
    pub fn new(seed: u64) -> Randomizer {
        Randomizer { rng: Pcg64::seed_from_u64(seed) }
    }

    /// Uniform integer in the inclusive range `[low, high]`.
    /// A reversed range collapses to `low`.
    pub fn get_int(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            low
        } else {
            self.rng.random_range(low..=high)
        }
    }

    pub fn coin_flip(&mut self) -> bool {
        self.get_int(0, 1) == 0
    }
}

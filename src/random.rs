//! Seeded random number generation.
//!
//! All stochastic operators take `&mut impl Rng`; this module only decides
//! which concrete generator a run uses.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
///
/// Two generators built from the same seed produce identical streams, so a
/// seeded [`GaRunner`](crate::ga::GaRunner) run is reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from the configured seed, or from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

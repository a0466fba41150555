//! Uniform dice: rolling, best-of-N-keep-K sums, and exact sum distributions.
//!
//! All randomness comes from a caller-supplied [`Source`]. Any `rand` generator
//! works; [`seeded`] builds a deterministic one.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod dice;
pub mod error;
pub mod notation;
pub mod presets;
pub mod probability;

pub use dice::{Dice, Source, SumResult, keep_highest};
pub use error::{DiceError, Result};
pub use notation::RollSpec;
pub use presets::Presets;
pub use probability::expected_sum;

/// Deterministic generator for reproducible rolls.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

//! Seeded random source shared by every crate in the workspace.

use crate::types::Position;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The simulation's random stream
pub type SimRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> SimRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform in-bounds position on a `width` x `height` board
pub fn random_position(width: i32, height: i32, rng: &mut SimRng) -> Position {
    Position::new(rng.gen_range(0..width), rng.gen_range(0..height))
}

/// Bernoulli trial with probability `chance`
pub fn roll(chance: f64, rng: &mut SimRng) -> bool {
    rng.gen::<f64>() < chance
}

//! Procedural star field: uniformly scattered points inside a cube.
//!
//! Every coordinate is drawn independently from `[-spread/2, spread/2]`.
//! No collision avoidance; overlapping stars are fine. Placement is random
//! per run unless a seed (or any `rand::Rng`) is supplied.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single star. Radius and material are shared constants of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
}

/// Uniform value in `[-spread/2, spread/2]`
pub fn rand_float_spread<R: Rng>(rng: &mut R, spread: f32) -> f32 {
    spread * (0.5 - rng.random::<f32>())
}

/// Generates star positions from an injectable random source.
pub struct StarFieldGenerator;

impl StarFieldGenerator {
    /// Fresh, non-reproducible field from the thread RNG
    pub fn generate(count: usize, spread: f32) -> Vec<Star> {
        Self::generate_with(&mut rand::rng(), count, spread)
    }

    /// Reproducible field for a given seed
    pub fn generate_seeded(seed: u64, count: usize, spread: f32) -> Vec<Star> {
        Self::generate_with(&mut ChaCha8Rng::seed_from_u64(seed), count, spread)
    }

    /// Field drawn from the caller's RNG
    pub fn generate_with<R: Rng>(rng: &mut R, count: usize, spread: f32) -> Vec<Star> {
        (0..count)
            .map(|_| {
                let x = rand_float_spread(rng, spread);
                let y = rand_float_spread(rng, spread);
                let z = rand_float_spread(rng, spread);
                Star { position: Vec3::new(x, y, z) }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "starfield_tests.rs"]
mod tests;

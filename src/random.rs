//! Random number generation for ray tracing.
//!
//! Every sampling call goes through an explicit [`Sampler`] backed by a
//! ChaCha20 PRNG. Renders give each worker its own stream, so no generator is
//! ever shared between threads, and a fixed seed replays the same image.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Upper bound on rejection-sampling rounds. Expected count is about 2.
const MAX_REJECTION_ROUNDS: u32 = 1024;

/// Source of uniform samples and the derived geometric distributions.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: ChaCha20Rng,
}

impl Sampler {
    /// Deterministic sampler for the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Deterministic sampler on an independent ChaCha stream.
    ///
    /// Two samplers with the same seed but different streams never produce
    /// overlapping sequences, which is what parallel workers need.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// Generate a random f32 in [0.0, 1.0)
    pub fn uniform(&mut self) -> f32 {
        self.rng.random()
    }

    /// Generate a random f32 in [min, max)
    pub fn uniform_range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.uniform()
    }

    /// Generate a random Vec3A with each component in [min, max)
    pub fn uniform_vector(&mut self, min: f32, max: f32) -> Vec3A {
        let x = self.uniform_range(min, max);
        let y = self.uniform_range(min, max);
        let z = self.uniform_range(min, max);
        Vec3A::new(x, y, z)
    }

    /// Generate a random point strictly inside the unit ball.
    ///
    /// Rejection sampling from the [-1, 1) cube. Falls back to the origin if
    /// the round cap is ever reached.
    pub fn in_unit_ball(&mut self) -> Vec3A {
        for _ in 0..MAX_REJECTION_ROUNDS {
            let p = self.uniform_vector(-1.0, 1.0);
            if p.length() < 1.0 {
                return p;
            }
        }
        Vec3A::ZERO
    }

    /// Random point inside the unit disk in the xy plane.
    ///
    /// Projection of [`Sampler::in_unit_ball`] onto its x and y components.
    pub fn in_unit_disk(&mut self) -> Vec3A {
        let p = self.in_unit_ball();
        Vec3A::new(p.x, p.y, 0.0)
    }

    /// Generate random RGB color with components in [0.0, 1.0).
    pub fn uniform_color(&mut self) -> Vec3A {
        self.uniform_vector(0.0, 1.0)
    }

    /// Generate random RGB color with components in [min, max).
    pub fn uniform_color_range(&mut self, min: f32, max: f32) -> Vec3A {
        self.uniform_vector(min, max)
    }
}

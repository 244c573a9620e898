//! Spawn context for particle initialization.
//!
//! Provides a seedable random source plus helpers for the spawn patterns the
//! field uses. The RNG is seeded explicitly, never from the wall clock, so
//! the same seed always produces the same particle layout, which is what the
//! property tests rely on.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable random source used when (re)building the particle set.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(7);
/// let pos = ctx.random_in_rect(1200.0, 800.0);
/// let vel = ctx.random_velocity(0.175);
/// ```
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    // ========== Spawn helpers ==========

    /// Uniformly random point inside a `w × h` rectangle anchored at the origin.
    pub fn random_in_rect(&mut self, w: f32, h: f32) -> Vec2 {
        Vec2::new(self.rng.gen_range(0.0..w), self.rng.gen_range(0.0..h))
    }

    /// Random velocity with each component uniform in `[-max_speed, max_speed)`.
    pub fn random_velocity(&mut self, max_speed: f32) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(-max_speed..max_speed),
            self.rng.gen_range(-max_speed..max_speed),
        )
    }

    /// Random radius uniform in `[min, max)`.
    pub fn random_radius(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SpawnContext::new(42);
        let mut b = SpawnContext::new(42);
        for _ in 0..32 {
            assert_eq!(a.random_in_rect(800.0, 600.0), b.random_in_rect(800.0, 600.0));
            assert_eq!(a.random_velocity(0.175), b.random_velocity(0.175));
        }
    }

    #[test]
    fn test_ranges_respected() {
        let mut ctx = SpawnContext::new(1);
        for _ in 0..1000 {
            let p = ctx.random_in_rect(100.0, 50.0);
            assert!(p.x >= 0.0 && p.x < 100.0);
            assert!(p.y >= 0.0 && p.y < 50.0);

            let v = ctx.random_velocity(0.175);
            assert!(v.x >= -0.175 && v.x < 0.175);
            assert!(v.y >= -0.175 && v.y < 0.175);

            let r = ctx.random_radius(0.6, 2.0);
            assert!(r >= 0.6 && r < 2.0);
        }
    }
}

//! Seedable random source for spawning

use drift_core::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Random draws used by respawn, over any `RngCore`.
///
/// Production uses a seeded `StdRng`; tests can plug in a mock generator.
pub struct ParticleRng<R = StdRng> {
    inner: R,
}

impl ParticleRng<StdRng> {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl<R: RngCore> ParticleRng<R> {
    pub fn from_rng(inner: R) -> Self {
        Self { inner }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform index into a collection of `len` elements; `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Direction from three independent draws in [-1, 1), normalized.
    ///
    /// A draw that lands on the origin normalizes to `Vec3::ZERO`.
    pub fn direction(&mut self) -> Vec3 {
        Vec3::new(
            self.range(-1.0, 1.0),
            self.range(-1.0, 1.0),
            self.range(-1.0, 1.0),
        )
        .normalized()
    }

    /// Value in [min, max) skewed toward `min` by cubing a uniform draw
    pub fn cubic_skewed(&mut self, min: f32, max: f32) -> f32 {
        let u = self.next_f32();
        min + u * u * u * (max - min)
    }
}

//! Deterministic gradient noise used by the ripple force

use drift_core::Vec3;
use noise::{NoiseFn, Perlin};

/// A deterministic scalar noise field over 3D space.
///
/// Same inputs must give the same output, and the output stays in `[-1, 1]`.
pub trait NoiseSource: Send + Sync {
    /// Sample at `point`, with `phase` added to the z coordinate so the field
    /// can be scrolled through time.
    fn sample(&self, point: Vec3, phase: f32) -> f32;
}

/// Improved Perlin gradient noise
#[derive(Clone)]
pub struct PerlinNoise {
    noise: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(Perlin::DEFAULT_SEED)
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, point: Vec3, phase: f32) -> f32 {
        let value = self.noise.get([
            point.x as f64,
            point.y as f64,
            point.z as f64 + phase as f64,
        ]);
        (value as f32).clamp(-1.0, 1.0)
    }
}

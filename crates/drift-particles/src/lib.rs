//! Drift Particles - Mesh-anchored interactive particle field
//!
//! Particles are spawned on points sampled from a mesh surface and held there
//! by a spring while the pointer pushes them around:
//! - Structure-of-arrays particle store with flat render buffers
//! - Per-frame kernel: ripple noise, repulsion, damping, spring return, Euler step
//! - Distance-budget lifetimes with cubic-skewed respawn
//! - Click ripple envelope that swells the interaction radius

pub mod field;
pub mod kernel;
pub mod noise;
pub mod particle;
pub mod rand;
pub mod ripple;
pub mod spawn;

pub use field::{ParticleField, RenderSettings};
pub use kernel::{FrameInputs, KernelParams, StepStats};
pub use crate::noise::{NoiseSource, PerlinNoise};
pub use particle::{Particle, ParticleInstance, ParticleStore};
pub use crate::rand::ParticleRng;
pub use ripple::RippleController;
pub use spawn::SpawnPool;

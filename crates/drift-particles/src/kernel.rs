//! Per-frame particle simulation kernel
//!
//! Each particle, in index order:
//! 1. distance to the interaction point (its z taken as 0)
//! 2. ripple noise push, while a ripple runs and the particle is in range
//! 3. repulsion away from the interaction point, when in range
//! 4. damping (a fixed per-frame factor, not scaled by dt)
//! 5. spring toward the spawn anchor (scaled by dt)
//! 6. explicit Euler position step
//! 7. lifetime accrual and respawn once the budget is spent

use crate::noise::NoiseSource;
use crate::particle::ParticleStore;
use crate::rand::ParticleRng;
use crate::spawn::SpawnPool;
use drift_core::{SimulationConfig, Vec3};
use rand::RngCore;
use std::f32::consts::TAU;

/// Velocity retained per frame, independent of frame time
pub const DAMPING: f32 = 0.99;
/// Spatial frequency at which positions sample the noise field
pub const NOISE_FREQUENCY: f32 = 0.02;
/// Noise field scroll speed per second of ripple time
pub const NOISE_PHASE_RATE: f32 = 10.0;

/// Tuning constants for the kernel and respawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    pub base_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub return_spring: f32,
    pub noise_intensity: f32,
    pub repulsion_strength: f32,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

impl From<&SimulationConfig> for KernelParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            base_speed: config.base_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            return_spring: config.return_spring,
            noise_intensity: config.noise_intensity,
            repulsion_strength: config.repulsion_strength,
        }
    }
}

/// Per-frame inputs read by the kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Seconds since the previous frame, already clamped by the caller
    pub dt: f32,
    pub interaction_point: Vec3,
    /// Current effective interaction radius
    pub radius: f32,
    /// Global scale: force multiplier and size given to respawned particles
    pub scale: f32,
    /// Elapsed ripple time while a ripple is running
    pub ripple_elapsed: Option<f32>,
}

/// What one sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub simulated: usize,
    pub respawned: usize,
    /// True when the sweep was skipped for lack of spawn points
    pub idle: bool,
}

/// Advance every particle by one frame.
///
/// `expired` is scratch space for the indices due to respawn. It is cleared
/// on entry; callers keep it between frames so the sweep does not allocate.
/// With an empty pool nothing is touched and the stats report `idle`.
pub fn step<N, R>(
    store: &mut ParticleStore,
    pool: &SpawnPool,
    params: &KernelParams,
    inputs: &FrameInputs,
    noise: &N,
    rng: &mut ParticleRng<R>,
    expired: &mut Vec<usize>,
) -> StepStats
where
    N: NoiseSource + ?Sized,
    R: RngCore,
{
    expired.clear();
    if pool.is_empty() {
        return StepStats {
            idle: true,
            ..StepStats::default()
        };
    }

    let dt = inputs.dt;
    let target = Vec3::new(inputs.interaction_point.x, inputs.interaction_point.y, 0.0);
    let repulsion = params.repulsion_strength * inputs.scale;
    let noise_push = params.noise_intensity * inputs.scale;

    let cols = store.columns_mut();
    for i in 0..cols.positions.len() {
        let position = cols.positions[i];
        let mut velocity = cols.velocities[i];

        let offset = position - target;
        let distance = offset.length();

        if distance < inputs.radius {
            if let Some(elapsed) = inputs.ripple_elapsed {
                let n = noise.sample(position * NOISE_FREQUENCY, elapsed * NOISE_PHASE_RATE);
                let angle = n * TAU;
                // x and z share the cosine projection.
                velocity += Vec3::new(angle.cos(), angle.sin(), angle.cos()) * noise_push;
            }
            if distance > 0.0 {
                velocity += offset * (repulsion / distance);
            }
        }

        velocity *= DAMPING;
        velocity += (cols.origins[i] - position) * (params.return_spring * dt);

        cols.positions[i] = position + velocity * dt;
        cols.velocities[i] = velocity;

        cols.traveled[i] += params.base_speed * dt;
        if cols.traveled[i] >= cols.budgets[i] {
            expired.push(i);
        }
    }

    for &i in expired.iter() {
        store.reset(i, pool, params, inputs.scale, rng);
    }
    store.mark_dirty();

    StepStats {
        simulated: store.len(),
        respawned: expired.len(),
        idle: false,
    }
}

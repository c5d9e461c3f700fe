//! Events delivered to systems between frames

use drift_core::{Color, Vec3};

/// Input produced by pointer handlers, UI controls, and the mesh loader
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Pointer projected onto the interaction plane
    PointerMoved(Vec3),
    /// Primary button click; starts (or restarts) a ripple
    PrimaryClick,
    /// A mesh finished loading; replaces the spawn pool as a whole
    SpawnPointsLoaded(Vec<Vec3>),
    /// A mesh failed to load; the current pool stays in place
    SpawnPointsFailed(String),
    ScaleChanged(f32),
    InteractionRadiusChanged(f32),
    ParticleColorChanged(Color),
    BackgroundColorChanged(Color),
    GlowStrengthChanged(f32),
    /// Respawn every particle from the current pool
    RespawnAll,
}

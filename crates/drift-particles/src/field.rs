//! The particle field: owns the store, spawn pool, ripple, and interaction
//! state, and runs the kernel once per frame.

use crate::kernel::{self, FrameInputs, KernelParams, StepStats};
use crate::noise::{NoiseSource, PerlinNoise};
use crate::particle::ParticleStore;
use crate::rand::ParticleRng;
use crate::ripple::RippleController;
use crate::spawn::SpawnPool;
use drift_core::{Color, FieldConfig, Result, Vec3};
use drift_runtime::{FieldEvent, RuntimeSystem};

/// Values only a renderer reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub particle_color: Color,
    pub background_color: Color,
    pub glow_strength: f32,
}

/// Interactive mesh-anchored particle field
pub struct ParticleField {
    params: KernelParams,
    store: ParticleStore,
    pool: SpawnPool,
    ripple: RippleController,
    interaction_point: Vec3,
    scale: f32,
    render: RenderSettings,
    noise: Box<dyn NoiseSource>,
    rng: ParticleRng,
    last_stats: StepStats,
    total_respawns: u64,
    frames: u64,
    /// Respawn indices, reused across frames
    expired: Vec<usize>,
}

impl ParticleField {
    /// Build a field from a validated config, using Perlin noise
    pub fn new(config: &FieldConfig) -> Result<Self> {
        let mut rng = match config.simulation.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_entropy(),
        };
        let noise = PerlinNoise::new(rng.next_u32());
        Self::build(config, Box::new(noise), rng)
    }

    /// Build a field with a caller-supplied noise source
    pub fn with_noise(config: &FieldConfig, noise: Box<dyn NoiseSource>) -> Result<Self> {
        let rng = match config.simulation.seed {
            Some(seed) => ParticleRng::new(seed),
            None => ParticleRng::from_entropy(),
        };
        Self::build(config, noise, rng)
    }

    fn build(config: &FieldConfig, noise: Box<dyn NoiseSource>, rng: ParticleRng) -> Result<Self> {
        config.validate()?;
        let sim = &config.simulation;
        let interaction = &config.interaction;

        Ok(Self {
            params: KernelParams::from(sim),
            store: ParticleStore::new(sim.particle_count, interaction.scale),
            pool: SpawnPool::empty(),
            ripple: RippleController::new(interaction.radius, sim.ripple_duration),
            interaction_point: Vec3::ZERO,
            scale: interaction.scale,
            render: RenderSettings {
                particle_color: config.render.particle_color()?,
                background_color: config.render.background_color()?,
                glow_strength: config.render.glow_strength,
            },
            noise,
            rng,
            last_stats: StepStats::default(),
            total_respawns: 0,
            frames: 0,
            expired: Vec::new(),
        })
    }

    /// Advance the ripple and run one kernel sweep
    pub fn step(&mut self, dt: f32) -> StepStats {
        let radius = self.ripple.advance(dt);
        let inputs = FrameInputs {
            dt,
            interaction_point: self.interaction_point,
            radius,
            scale: self.scale,
            ripple_elapsed: self.ripple.elapsed(),
        };

        let stats = kernel::step(
            &mut self.store,
            &self.pool,
            &self.params,
            &inputs,
            self.noise.as_ref(),
            &mut self.rng,
            &mut self.expired,
        );

        if stats.idle && !self.last_stats.idle {
            log::debug!("Spawn pool empty; particle field idle");
        }
        self.total_respawns += stats.respawned as u64;
        self.frames += 1;
        self.last_stats = stats;
        stats
    }

    /// Swap in a new spawn pool.
    ///
    /// The first non-empty pool seeds every particle. Later pools only affect
    /// particles as they respawn. An empty point list is ignored.
    pub fn replace_spawn_points(&mut self, points: Vec<Vec3>) {
        self.replace_pool(SpawnPool::new(points));
    }

    pub fn replace_pool(&mut self, pool: SpawnPool) {
        if pool.is_empty() {
            log::warn!("Ignoring empty spawn point set; keeping {} point(s)", self.pool.len());
            return;
        }
        let seeding = self.pool.is_empty();
        log::info!("Spawn pool replaced: {} point(s)", pool.len());
        self.pool = pool;
        if seeding {
            self.respawn_all();
        }
    }

    /// Respawn every particle from the current pool
    pub fn respawn_all(&mut self) -> usize {
        let count = self
            .store
            .reset_all(&self.pool, &self.params, self.scale, &mut self.rng);
        if count > 0 {
            log::info!("Respawned {count} particle(s)");
        }
        count
    }

    pub fn set_interaction_point(&mut self, point: Vec3) {
        if !point.is_finite() {
            log::warn!("Ignoring non-finite interaction point {point:?}");
            return;
        }
        self.interaction_point = point;
    }

    pub fn primary_click(&mut self) {
        self.ripple.trigger(self.scale);
        log::debug!(
            "Ripple started: peak radius {:.1}",
            self.ripple.max_radius()
        );
    }

    /// Change the global scale; every particle's size follows immediately
    pub fn set_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("Ignoring invalid scale {scale}");
            return;
        }
        self.scale = scale;
        self.store.fill_sizes(scale);
    }

    pub fn set_interaction_radius(&mut self, radius: f32) {
        if !radius.is_finite() || radius < 0.0 {
            log::warn!("Ignoring invalid interaction radius {radius}");
            return;
        }
        self.ripple.set_base_radius(radius);
    }

    pub fn interaction_point(&self) -> Vec3 {
        self.interaction_point
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn effective_radius(&self) -> f32 {
        self.ripple.effective_radius()
    }

    pub fn ripple(&self) -> &RippleController {
        &self.ripple
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn pool(&self) -> &SpawnPool {
        &self.pool
    }

    pub fn params(&self) -> &KernelParams {
        &self.params
    }

    pub fn render_settings(&self) -> &RenderSettings {
        &self.render
    }

    pub fn last_stats(&self) -> StepStats {
        self.last_stats
    }

    pub fn total_respawns(&self) -> u64 {
        self.total_respawns
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

impl RuntimeSystem for ParticleField {
    fn initialize(&mut self) -> Result<()> {
        log::info!(
            "Particle field: {} particle(s), radius {:.1}, scale {:.2}",
            self.store.len(),
            self.ripple.base_radius(),
            self.scale
        );
        Ok(())
    }

    fn handle_event(&mut self, event: &FieldEvent) -> Result<()> {
        match event {
            FieldEvent::PointerMoved(point) => self.set_interaction_point(*point),
            FieldEvent::PrimaryClick => self.primary_click(),
            FieldEvent::SpawnPointsLoaded(points) => self.replace_spawn_points(points.clone()),
            FieldEvent::SpawnPointsFailed(reason) => {
                log::error!(
                    "Spawn point load failed: {reason}; keeping {} point(s)",
                    self.pool.len()
                );
            }
            FieldEvent::ScaleChanged(scale) => self.set_scale(*scale),
            FieldEvent::InteractionRadiusChanged(radius) => self.set_interaction_radius(*radius),
            FieldEvent::ParticleColorChanged(color) => self.render.particle_color = *color,
            FieldEvent::BackgroundColorChanged(color) => self.render.background_color = *color,
            FieldEvent::GlowStrengthChanged(strength) => {
                if strength.is_finite() {
                    self.render.glow_strength = *strength;
                } else {
                    log::warn!("Ignoring non-finite glow strength {strength}");
                }
            }
            FieldEvent::RespawnAll => {
                self.respawn_all();
            }
        }
        Ok(())
    }

    fn update(&mut self, dt: f32) -> Result<()> {
        self.step(dt);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!(
            "Particle field stopped after {} frame(s), {} respawn(s)",
            self.frames,
            self.total_respawns
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

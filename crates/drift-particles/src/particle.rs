//! Particle storage: structure-of-arrays simulation state and render buffers

use crate::kernel::KernelParams;
use crate::rand::ParticleRng;
use crate::spawn::SpawnPool;
use bytemuck::{Pod, Zeroable};
use drift_core::Vec3;
use rand::RngCore;

/// Snapshot of one particle's state, for inspection and tests
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Spawn anchor the return spring pulls toward
    pub origin: Vec3,
    /// Distance accrued since the last respawn
    pub traveled: f32,
    /// Distance at which the particle respawns
    pub budget: f32,
    pub size: f32,
}

/// GPU instance data for instanced point renderers.
/// 16 bytes: xyz = position, w = size.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos_size: [f32; 4],
}

/// Fixed-size particle population stored as parallel arrays.
///
/// Sized once at construction and never resized. Positions and sizes double
/// as the render buffers; `dirty` tells the renderer they changed.
pub struct ParticleStore {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    origins: Vec<Vec3>,
    traveled: Vec<f32>,
    budgets: Vec<f32>,
    sizes: Vec<f32>,
    dirty: bool,
}

impl ParticleStore {
    pub fn new(count: usize, size: f32) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count],
            velocities: vec![Vec3::ZERO; count],
            origins: vec![Vec3::ZERO; count],
            traveled: vec![0.0; count],
            budgets: vec![0.0; count],
            sizes: vec![size; count],
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, i: usize) -> Particle {
        Particle {
            position: self.positions[i],
            velocity: self.velocities[i],
            origin: self.origins[i],
            traveled: self.traveled[i],
            budget: self.budgets[i],
            size: self.sizes[i],
        }
    }

    pub fn set(&mut self, i: usize, particle: Particle) {
        self.positions[i] = particle.position;
        self.velocities[i] = particle.velocity;
        self.origins[i] = particle.origin;
        self.traveled[i] = particle.traveled;
        self.budgets[i] = particle.budget;
        self.sizes[i] = particle.size;
        self.dirty = true;
    }

    /// Respawn particle `i` on a random point of `pool`.
    ///
    /// Returns false and leaves the particle untouched when the pool is empty.
    pub fn reset<R: RngCore>(
        &mut self,
        i: usize,
        pool: &SpawnPool,
        params: &KernelParams,
        size: f32,
        rng: &mut ParticleRng<R>,
    ) -> bool {
        let Some(spawn) = pool.pick(rng) else {
            return false;
        };
        self.positions[i] = spawn;
        self.origins[i] = spawn;
        self.velocities[i] = rng.direction() * params.base_speed;
        self.traveled[i] = 0.0;
        self.budgets[i] = rng.cubic_skewed(params.min_distance, params.max_distance);
        self.sizes[i] = size;
        self.dirty = true;
        true
    }

    /// Respawn every particle; returns how many were respawned
    pub fn reset_all<R: RngCore>(
        &mut self,
        pool: &SpawnPool,
        params: &KernelParams,
        size: f32,
        rng: &mut ParticleRng<R>,
    ) -> usize {
        if pool.is_empty() {
            return 0;
        }
        for i in 0..self.len() {
            self.reset(i, pool, params, size, rng);
        }
        self.len()
    }

    /// Split borrows of every array, for the kernel sweep
    pub(crate) fn columns_mut(&mut self) -> Columns<'_> {
        Columns {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            origins: &self.origins,
            traveled: &mut self.traveled,
            budgets: &self.budgets,
        }
    }

    /// Overwrite every render size
    pub fn fill_sizes(&mut self, size: f32) {
        self.sizes.fill(size);
        self.dirty = true;
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` buffer
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the dirty flag and clear it; the renderer calls this before upload
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Pack position + size into `out` for instanced draws
    pub fn pack_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(
            self.positions
                .iter()
                .zip(&self.sizes)
                .map(|(p, s)| ParticleInstance {
                    pos_size: [p.x, p.y, p.z, *s],
                }),
        );
    }
}

pub(crate) struct Columns<'a> {
    pub positions: &'a mut [Vec3],
    pub velocities: &'a mut [Vec3],
    pub origins: &'a [Vec3],
    pub traveled: &'a mut [f32],
    pub budgets: &'a [f32],
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn params() -> KernelParams {
        KernelParams {
            min_distance: 1.0,
            max_distance: 50.0,
            ..KernelParams::default()
        }
    }

    fn three_point_pool() -> SpawnPool {
        SpawnPool::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(-10.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn reset_respects_bounds_and_anchor() {
        let pool = three_point_pool();
        let params = params();
        let mut store = ParticleStore::new(64, 1.0);
        let mut rng = ParticleRng::new(42);

        assert_eq!(store.reset_all(&pool, &params, 2.0, &mut rng), 64);
        for i in 0..store.len() {
            let p = store.get(i);
            assert!(p.budget >= params.min_distance && p.budget <= params.max_distance);
            assert_eq!(p.position, p.origin);
            assert!(pool.contains(&p.position));
            assert_eq!(p.traveled, 0.0);
            assert_eq!(p.size, 2.0);
            assert!((p.velocity.length() - params.base_speed).abs() < 1e-5);
        }
        assert!(store.take_dirty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn reset_on_empty_pool_is_noop() {
        let mut store = ParticleStore::new(2, 1.0);
        let mut rng = ParticleRng::new(1);
        let before = store.get(0);
        assert!(!store.reset(0, &SpawnPool::empty(), &params(), 3.0, &mut rng));
        assert_eq!(store.get(0), before);
        assert!(!store.is_dirty());
    }

    #[test]
    fn zero_direction_draw_gives_zero_velocity() {
        let pool = SpawnPool::new(vec![Vec3::new(4.0, 5.0, 6.0)]);
        let mut store = ParticleStore::new(1, 1.0);
        let mut rng = ParticleRng::from_rng(StepRng::new(0x8000_0000, 0));
        assert!(store.reset(0, &pool, &params(), 1.0, &mut rng));
        let p = store.get(0);
        assert_eq!(p.velocity, Vec3::ZERO);
        assert!(p.position.is_finite());
        // u = 0.5 -> 1 + 0.125 * 49
        assert!((p.budget - 7.125).abs() < 1e-4);
    }

    #[test]
    fn flat_buffer_and_instances() {
        let mut store = ParticleStore::new(2, 1.5);
        store.set(
            1,
            Particle {
                position: Vec3::new(1.0, 2.0, 3.0),
                size: 4.0,
                ..Particle::default()
            },
        );
        assert_eq!(store.positions_flat(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0]);

        let mut instances = Vec::new();
        store.pack_instances(&mut instances);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].pos_size, [0.0, 0.0, 0.0, 1.5]);
        assert_eq!(instances[1].pos_size, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn fill_sizes_marks_dirty() {
        let mut store = ParticleStore::new(3, 1.0);
        store.fill_sizes(2.5);
        assert!(store.sizes().iter().all(|s| *s == 2.5));
        assert!(store.is_dirty());
    }

    #[test]
    fn instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 16);
    }
}

//! Spawn point pool: mesh surface samples particles respawn on

use crate::rand::ParticleRng;
use drift_core::Vec3;
use rand::RngCore;
use std::sync::Arc;

/// Immutable set of spawn points.
///
/// Cloning shares the underlying points, so a loader can hand a finished pool
/// to the field in one move and a respawn only ever sees one complete pool.
#[derive(Clone, Debug, Default)]
pub struct SpawnPool {
    points: Arc<[Vec3]>,
}

impl SpawnPool {
    /// Build a pool, dropping any point with a non-finite coordinate
    pub fn new(points: Vec<Vec3>) -> Self {
        let total = points.len();
        let points: Vec<Vec3> = points.into_iter().filter(Vec3::is_finite).collect();
        if points.len() < total {
            log::warn!(
                "Dropped {} non-finite spawn point(s) of {}",
                total - points.len(),
                total
            );
        }
        Self {
            points: points.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Scale points uniformly, then re-centre them on their bounding-box centre
    pub fn centered(points: Vec<Vec3>, scale: f32) -> Self {
        let scaled: Vec<Vec3> = points.into_iter().map(|p| p * scale).collect();
        let pool = Self::new(scaled);
        let Some((min, max)) = pool.bounds() else {
            return pool;
        };
        let center = (min + max) * 0.5;
        Self {
            points: pool.points.iter().map(|p| *p - center).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn contains(&self, point: &Vec3) -> bool {
        self.points.iter().any(|p| p == point)
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty pool
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(p), max.max(p))),
        )
    }

    /// Uniformly random point, or `None` for an empty pool
    pub fn pick<R: RngCore>(&self, rng: &mut ParticleRng<R>) -> Option<Vec3> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[rng.index(self.points.len())])
    }
}

impl From<Vec<Vec3>> for SpawnPool {
    fn from(points: Vec<Vec3>) -> Self {
        Self::new(points)
    }
}

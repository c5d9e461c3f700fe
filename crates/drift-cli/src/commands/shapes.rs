//! Procedural spawn point sets standing in for a loaded mesh

use anyhow::{Context, Result};
use clap::ValueEnum;
use drift_core::Vec3;
use std::f32::consts::{PI, TAU};

/// Built-in spawn shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Evenly spread points on a unit sphere shell
    Sphere,
    /// Points on a unit circle in the z=0 plane
    Ring,
    /// Square grid spanning [-1, 1] in the z=0 plane
    Grid,
}

/// Roughly `count` points of `shape` at unit size
pub fn generate(shape: Shape, count: usize) -> Vec<Vec3> {
    let count = count.max(1);
    match shape {
        Shape::Sphere => {
            // Fibonacci lattice
            let golden = PI * (3.0 - 5.0f32.sqrt());
            (0..count)
                .map(|i| {
                    let y = 1.0 - 2.0 * (i as f32 + 0.5) / count as f32;
                    let r = (1.0 - y * y).sqrt();
                    let theta = golden * i as f32;
                    Vec3::new(theta.cos() * r, y, theta.sin() * r)
                })
                .collect()
        }
        Shape::Ring => (0..count)
            .map(|i| {
                let theta = TAU * i as f32 / count as f32;
                Vec3::new(theta.cos(), theta.sin(), 0.0)
            })
            .collect(),
        Shape::Grid => {
            let side = (count as f32).sqrt().ceil().max(2.0) as usize;
            let step = 2.0 / (side - 1) as f32;
            (0..side * side)
                .map(|i| {
                    let (col, row) = (i % side, i / side);
                    Vec3::new(-1.0 + col as f32 * step, -1.0 + row as f32 * step, 0.0)
                })
                .collect()
        }
    }
}

/// Read a JSON array of `[x, y, z]` triples
pub fn load_points(path: &str) -> Result<Vec<Vec3>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let raw: Vec<[f32; 3]> = serde_json::from_str(&content)
        .with_context(|| format!("{path} is not a JSON array of [x, y, z] points"))?;
    Ok(raw.into_iter().map(Vec3::from_array).collect())
}

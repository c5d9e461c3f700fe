//! Drift Core - Foundational types for the drift particle field
//!
//! This crate provides the types that all other drift crates depend on:
//! - `Vec3`, `Color` - Spatial and color types
//! - `FieldConfig` - Layered TOML configuration
//! - Error types and Result alias

mod config;
mod error;
mod types;

pub use config::{
    FieldConfig, InteractionConfig, RenderConfig, SimulationConfig, ENV_PARTICLE_COUNT, ENV_SEED,
};
pub use error::{DriftError, Result};
pub use types::{Color, Vec3};

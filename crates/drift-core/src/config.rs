//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `DRIFT_SEED`, `DRIFT_PARTICLE_COUNT`
//! 2. A TOML file passed by the caller
//! 3. Built-in defaults

use crate::error::{DriftError, Result};
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `simulation.seed`
pub const ENV_SEED: &str = "DRIFT_SEED";
/// Environment variable overriding `simulation.particle_count`
pub const ENV_PARTICLE_COUNT: &str = "DRIFT_PARTICLE_COUNT";

/// Kernel tuning and population size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of particles, fixed for the lifetime of a field
    pub particle_count: usize,
    /// RNG seed; `None` seeds from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Speed of a freshly spawned particle, also the lifetime accrual rate
    pub base_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub return_spring: f32,
    pub noise_intensity: f32,
    pub repulsion_strength: f32,
    /// Length of the click ripple envelope in seconds
    pub ripple_duration: f32,
    /// Upper clamp applied to frame deltas before they reach the kernel
    pub max_frame_delta: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 50_000,
            seed: None,
            base_speed: 0.1,
            min_distance: 1.0,
            max_distance: 50.0,
            return_spring: 15.0,
            noise_intensity: 5.0,
            repulsion_strength: 2.0,
            ripple_duration: 0.5,
            max_frame_delta: 0.25,
        }
    }
}

/// Live-adjustable pointer interaction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Global scale: render size of every particle and multiplier on forces
    pub scale: f32,
    /// Steady-state interaction radius
    pub radius: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            radius: 50.0,
        }
    }
}

/// Settings only a renderer cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub particle_color: String,
    pub background_color: String,
    pub glow_strength: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            particle_color: "#ffffff".to_string(),
            background_color: "#000000".to_string(),
            glow_strength: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn particle_color(&self) -> Result<Color> {
        Color::parse_hex(&self.particle_color)
    }

    pub fn background_color(&self) -> Result<Color> {
        Color::parse_hex(&self.background_color)
    }
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub simulation: SimulationConfig,
    pub interaction: InteractionConfig,
    pub render: RenderConfig,
}

impl FieldConfig {
    /// Load config with layered precedence: defaults < file < env vars
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file path only, without env overrides
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw.trim().parse::<u64>().map_err(|_| {
                DriftError::ConfigError(format!("{ENV_SEED} is not an unsigned integer: {raw}"))
            })?;
            self.simulation.seed = Some(seed);
        }
        if let Some(raw) = lookup(ENV_PARTICLE_COUNT) {
            let count = raw.trim().parse::<usize>().map_err(|_| {
                DriftError::ConfigError(format!(
                    "{ENV_PARTICLE_COUNT} is not an unsigned integer: {raw}"
                ))
            })?;
            self.simulation.particle_count = count;
        }
        Ok(())
    }

    /// Reject configurations the kernel cannot run with
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.particle_count == 0 {
            return Err(DriftError::ConfigError(
                "simulation.particle_count must be at least 1".into(),
            ));
        }

        let finite = [
            ("simulation.base_speed", sim.base_speed),
            ("simulation.min_distance", sim.min_distance),
            ("simulation.max_distance", sim.max_distance),
            ("simulation.return_spring", sim.return_spring),
            ("simulation.noise_intensity", sim.noise_intensity),
            ("simulation.repulsion_strength", sim.repulsion_strength),
            ("simulation.ripple_duration", sim.ripple_duration),
            ("simulation.max_frame_delta", sim.max_frame_delta),
            ("interaction.scale", self.interaction.scale),
            ("interaction.radius", self.interaction.radius),
            ("render.glow_strength", self.render.glow_strength),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(DriftError::ConfigError(format!("{field} must be finite")));
            }
        }

        check_min("simulation.min_distance", sim.min_distance, 0.0)?;
        check_min("simulation.max_distance", sim.max_distance, sim.min_distance)?;
        check_min("simulation.base_speed", sim.base_speed, 0.0)?;
        check_min("interaction.radius", self.interaction.radius, 0.0)?;
        check_min("simulation.max_frame_delta", sim.max_frame_delta, 0.0)?;
        if sim.ripple_duration <= 0.0 {
            return Err(DriftError::ConfigError(
                "simulation.ripple_duration must be positive".into(),
            ));
        }
        if self.interaction.scale <= 0.0 {
            return Err(DriftError::ConfigError(
                "interaction.scale must be positive".into(),
            ));
        }

        self.render.particle_color()?;
        self.render.background_color()?;
        Ok(())
    }
}

fn check_min(field: &str, value: f32, min: f32) -> Result<()> {
    if value < min {
        return Err(DriftError::ValueOutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: f64::INFINITY,
            value: value as f64,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = FieldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.simulation.particle_count, 50_000);
        assert!((config.simulation.return_spring - 15.0).abs() < 1e-6);
        assert!((config.interaction.radius - 50.0).abs() < 1e-6);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r##"
[simulation]
particle_count = 3
seed = 7
max_distance = 20

[interaction]
scale = 2.5

[render]
particle_color = "#ff8844"
"##;
        let config = FieldConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.simulation.particle_count, 3);
        assert_eq!(config.simulation.seed, Some(7));
        assert!((config.simulation.max_distance - 20.0).abs() < 1e-6);
        // Unspecified fields keep their defaults
        assert!((config.simulation.min_distance - 1.0).abs() < 1e-6);
        assert!((config.interaction.scale - 2.5).abs() < 1e-6);
        assert!((config.interaction.radius - 50.0).abs() < 1e-6);
        let color = config.render.particle_color().unwrap();
        assert!((color.g - 0.533).abs() < 0.01);
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut config = FieldConfig::default();
        config.simulation.seed = Some(99);
        config.interaction.radius = 12.0;
        let text = config.to_toml_string().unwrap();
        let parsed = FieldConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn overrides_take_precedence() {
        let vars: HashMap<&str, &str> =
            [(ENV_SEED, "42"), (ENV_PARTICLE_COUNT, " 128 ")].into_iter().collect();
        let mut config = FieldConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.particle_count, 128);
    }

    #[test]
    fn bad_override_is_an_error() {
        let mut config = FieldConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_SEED).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, DriftError::ConfigError(_)));
    }

    #[test]
    fn validate_rejects_inverted_distances() {
        let mut config = FieldConfig::default();
        config.simulation.min_distance = 10.0;
        config.simulation.max_distance = 5.0;
        assert!(matches!(
            config.validate(),
            Err(DriftError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let mut config = FieldConfig::default();
        config.simulation.particle_count = 0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.simulation.ripple_duration = 0.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.interaction.scale = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::default();
        config.render.background_color = "blue".into();
        assert!(matches!(
            config.validate(),
            Err(DriftError::InvalidColor(_))
        ));
    }
}

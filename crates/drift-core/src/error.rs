//! Error types for drift

use thiserror::Error;

/// The main error type for drift operations
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Result type alias for drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

impl From<toml::de::Error> for DriftError {
    fn from(err: toml::de::Error) -> Self {
        DriftError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for DriftError {
    fn from(err: toml::ser::Error) -> Self {
        DriftError::TomlSerError(err.to_string())
    }
}

//! CLI command implementations

pub mod config;
pub mod shapes;
pub mod simulate;

// Error types for world construction and configuration loading.
// The per-frame tick itself is infallible; errors only surface at the
// boundary where external data enters the simulation.

use thiserror::Error;

/// A configuration value that would break the simulation's numeric policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be at least zero, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must not be zero")]
    ZeroCount { field: &'static str },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Precondition violations rejected at world-construction or spawn time.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("non-finite spawn coordinate ({x}, {z})")]
    NonFiniteCoordinate { x: f32, z: f32 },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

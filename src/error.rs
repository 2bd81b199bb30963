//! Error types for the entity core.
//!
//! Construction-time parameter problems are `ConfigError`; running out of
//! slots under a configured ceiling is `PoolError`.  Everything else that
//! happens to an entity (off-screen exit, zero hit-points, a missed
//! collision) is a normal state transition, not an error.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// World bounds with zero or negative extent would make every spawn
    /// position and boundary check degenerate.
    #[error("world bounds must have positive extent, got {width}x{height}")]
    EmptyBounds { width: f32, height: f32 },

    #[error("spawn interval must be positive, got {0}")]
    NonPositiveInterval(f32),

    #[error("reload interval must be positive, got {0}")]
    NonPositiveReload(f32),
}

#[derive(Debug, Error, PartialEq)]
pub enum PoolError {
    /// All slots are active and the pool was built with a ceiling.
    /// The caller skips the spawn for this frame.
    #[error("pool ceiling of {0} slots reached")]
    Exhausted(usize),
}

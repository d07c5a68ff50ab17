//! Load-time configuration errors.
//!
//! Everything here is fatal when a config or level is loaded; nothing in the
//! per-frame simulation returns these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("path needs at least 2 waypoints, got {waypoints}")]
    PathTooShort { waypoints: usize },

    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint { index: usize },

    #[error("wave row {row}: unknown enemy kind `{id}`")]
    UnknownEnemyKind { row: usize, id: String },

    #[error("wave row {row}: spawn delay {delay} must be finite and non-negative")]
    InvalidSpawnDelay { row: usize, delay: f64 },

    #[error("wave row {row}: wave numbers start at 1")]
    ZeroWaveNumber { row: usize },

    #[error("level `{level}` defines no waves")]
    NoWaves { level: String },

    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} grid")]
    CellOutOfGrid {
        column: u32,
        row: u32,
        columns: u32,
        rows: u32,
    },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

//! Level definitions: the path, the wave rows, and the special cells.

use std::path::Path as FsPath;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;
use crate::error::ConfigError;
use crate::types::{CellCoord, Path};

/// One row of wave data as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveRow {
    /// Enemy kind id, resolved with `EnemyKind::from_id`.
    pub enemy: String,
    /// 1-based wave number.
    pub wave: u32,
    /// Seconds after wave launch.
    pub spawn_delay_secs: f64,
}

/// A validated wave entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub kind: EnemyKind,
    pub spawn_delay_secs: f64,
}

/// A complete level as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Pixel-space waypoints, spawn first, castle last.
    pub path: Vec<DVec2>,
    pub waves: Vec<WaveRow>,
    /// Cells where an enemy is absorbed by the castle: it costs lives and
    /// pays no bounty.
    #[serde(default)]
    pub castle_cells: Vec<CellCoord>,
    /// Cells kept free of towers in addition to the path.
    #[serde(default)]
    pub safe_zone: Vec<CellCoord>,
}

impl LevelDefinition {
    /// Parse a level from JSON. Call `validate` before use.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a level file.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Check the level against a grid and build its path.
    pub fn validate(&self, columns: u32, rows: u32) -> Result<Path, ConfigError> {
        let path = Path::new(self.path.clone())?;

        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves {
                level: self.name.clone(),
            });
        }
        for (row, entry) in self.waves.iter().enumerate() {
            resolve_row(row, entry)?;
        }

        for cell in self.castle_cells.iter().chain(&self.safe_zone) {
            if !cell.within(columns, rows) {
                return Err(ConfigError::CellOutOfGrid {
                    column: cell.column,
                    row: cell.row,
                    columns,
                    rows,
                });
            }
        }

        Ok(path)
    }

    /// Entries of wave `wave`, ordered by spawn delay. Equal delays keep
    /// file order. Rows that fail validation are skipped.
    pub fn wave(&self, wave: u32) -> Vec<SpawnEntry> {
        let mut entries: Vec<SpawnEntry> = self
            .waves
            .iter()
            .enumerate()
            .filter(|(_, row)| row.wave == wave)
            .filter_map(|(index, row)| resolve_row(index, row).ok())
            .collect();
        entries.sort_by(|a, b| a.spawn_delay_secs.total_cmp(&b.spawn_delay_secs));
        entries
    }

    /// Highest wave number present in the data.
    pub fn max_wave(&self) -> u32 {
        self.waves.iter().map(|row| row.wave).max().unwrap_or(0)
    }
}

fn resolve_row(row: usize, entry: &WaveRow) -> Result<SpawnEntry, ConfigError> {
    let kind = EnemyKind::from_id(&entry.enemy).ok_or_else(|| ConfigError::UnknownEnemyKind {
        row,
        id: entry.enemy.clone(),
    })?;
    if entry.wave == 0 {
        return Err(ConfigError::ZeroWaveNumber { row });
    }
    if !entry.spawn_delay_secs.is_finite() || entry.spawn_delay_secs < 0.0 {
        return Err(ConfigError::InvalidSpawnDelay {
            row,
            delay: entry.spawn_delay_secs,
        });
    }
    Ok(SpawnEntry {
        kind,
        spawn_delay_secs: entry.spawn_delay_secs,
    })
}

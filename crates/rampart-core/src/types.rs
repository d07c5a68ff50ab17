//! Fundamental geometric and simulation types.
//!
//! Positions are pixel-space `glam::DVec2` values. The path is the only
//! geometry the simulation walks; everything else is grid cells.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SEGMENT_LENGTH, PATH_SAMPLES_PER_TILE};
use crate::error::ConfigError;

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulation steps run so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// A cell of the build grid, addressed by column and row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub column: u32,
    pub row: u32,
}

impl CellCoord {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// The cell containing `point`, or `None` when the point lies off the grid.
    pub fn from_point(point: DVec2, tile_size: f64, columns: u32, rows: u32) -> Option<Self> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let column = (point.x / tile_size).floor() as u32;
        let row = (point.y / tile_size).floor() as u32;
        (column < columns && row < rows).then_some(Self { column, row })
    }

    /// Pixel-space centre of the cell.
    pub fn center(&self, tile_size: f64) -> DVec2 {
        DVec2::new(
            self.column as f64 * tile_size + tile_size / 2.0,
            self.row as f64 * tile_size + tile_size / 2.0,
        )
    }

    /// Inclusive pixel bounds `(min, max)` of the cell.
    pub fn bounds(&self, tile_size: f64) -> (DVec2, DVec2) {
        let min = DVec2::new(self.column as f64 * tile_size, self.row as f64 * tile_size);
        (min, min + DVec2::splat(tile_size))
    }

    /// Whether `point` lies within the cell, edges included.
    pub fn contains(&self, point: DVec2, tile_size: f64) -> bool {
        let (min, max) = self.bounds(tile_size);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    pub fn within(&self, columns: u32, rows: u32) -> bool {
        self.column < columns && self.row < rows
    }
}

/// Where an enemy is along the path: the segment it is walking and how far
/// into that segment it has got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Index of the current segment (waypoint `segment` to `segment + 1`).
    pub segment: usize,
    /// Distance travelled into the current segment, in pixels.
    pub into_segment: f64,
}

/// The immutable polyline enemies walk along.
///
/// Holds at least two finite waypoints. Segment lengths and the distance
/// remaining from each waypoint to the end are precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<DVec2>,
    segment_lengths: Vec<f64>,
    remaining_from: Vec<f64>,
}

impl Path {
    pub fn new(waypoints: Vec<DVec2>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::PathTooShort {
                waypoints: waypoints.len(),
            });
        }
        if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::NonFiniteWaypoint { index });
        }

        let segment_lengths: Vec<f64> = waypoints
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .collect();

        // remaining_from[i] = distance from waypoint i to the final waypoint.
        let mut remaining_from = vec![0.0; waypoints.len()];
        for i in (0..segment_lengths.len()).rev() {
            remaining_from[i] = remaining_from[i + 1] + segment_lengths[i];
        }

        Ok(Self {
            waypoints,
            segment_lengths,
            remaining_from,
        })
    }

    pub fn waypoints(&self) -> &[DVec2] {
        &self.waypoints
    }

    pub fn start(&self) -> DVec2 {
        self.waypoints[0]
    }

    pub fn end(&self) -> DVec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Index of the final waypoint; a progress at this segment has arrived.
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn segment_count(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Endpoints of segment `index`, if it exists.
    pub fn segment(&self, index: usize) -> Option<(DVec2, DVec2)> {
        if index + 1 < self.waypoints.len() {
            Some((self.waypoints[index], self.waypoints[index + 1]))
        } else {
            None
        }
    }

    /// Length of segment `index`, floored so it is never zero.
    pub fn segment_length(&self, index: usize) -> f64 {
        self.segment_lengths
            .get(index)
            .copied()
            .unwrap_or(0.0)
            .max(MIN_SEGMENT_LENGTH)
    }

    pub fn total_length(&self) -> f64 {
        self.remaining_from[0]
    }

    /// Distance left to walk from `progress` to the final waypoint.
    pub fn remaining_distance(&self, progress: &PathProgress) -> f64 {
        if progress.segment >= self.segment_count() {
            return 0.0;
        }
        let into = progress.into_segment.min(self.segment_lengths[progress.segment]);
        (self.remaining_from[progress.segment] - into).max(0.0)
    }

    /// Pixel position for a given progress.
    pub fn position_at(&self, progress: &PathProgress) -> DVec2 {
        match self.segment(progress.segment) {
            Some((p0, p1)) => {
                let len = self.segment_length(progress.segment);
                p0 + (p1 - p0) * (progress.into_segment / len)
            }
            None => self.end(),
        }
    }

    /// Grid cells the path runs through.
    ///
    /// Every waypoint's cell is included, then each segment is sampled
    /// roughly every quarter tile. Points off the grid are ignored.
    pub fn covered_cells(&self, tile_size: f64, columns: u32, rows: u32) -> Vec<CellCoord> {
        let mut cells = Vec::new();
        let mut push = |point: DVec2| {
            if let Some(cell) = CellCoord::from_point(point, tile_size, columns, rows) {
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
        };

        for waypoint in &self.waypoints {
            push(*waypoint);
        }

        let step = tile_size / PATH_SAMPLES_PER_TILE;
        for pair in self.waypoints.windows(2) {
            let (p0, p1) = (pair[0], pair[1]);
            let length = p0.distance(p1).max(1.0);
            let steps = ((length / step) as usize).max(1);
            for s in 0..=steps {
                let t = s as f64 / steps as f64;
                push(p0 + (p1 - p0) * t);
            }
        }

        cells.sort();
        cells
    }
}

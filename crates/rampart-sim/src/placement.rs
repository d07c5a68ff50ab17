//! Build-grid bookkeeping: which cells are banned and which are taken.

use std::collections::{BTreeSet, HashMap};

use hecs::Entity;
use thiserror::Error;

use rampart_core::types::{CellCoord, Path};

/// Why a tower cannot go on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell is outside the grid")]
    OutOfGrid,
    #[error("cell already holds a tower")]
    Occupied,
    #[error("cell is on the path or in the safe zone")]
    Banned,
    #[error("tower costs {price} but only {gold} gold is available")]
    InsufficientGold { price: u32, gold: u32 },
}

/// Cell occupancy and the cells no tower may use.
#[derive(Debug, Clone)]
pub struct PlacementMap {
    columns: u32,
    rows: u32,
    path_cells: BTreeSet<CellCoord>,
    safe_zone: BTreeSet<CellCoord>,
    occupied: HashMap<CellCoord, Entity>,
}

impl PlacementMap {
    pub fn new(
        path: &Path,
        safe_zone: &[CellCoord],
        tile_size: f64,
        columns: u32,
        rows: u32,
    ) -> Self {
        Self {
            columns,
            rows,
            path_cells: path.covered_cells(tile_size, columns, rows).into_iter().collect(),
            safe_zone: safe_zone.iter().copied().collect(),
            occupied: HashMap::new(),
        }
    }

    pub fn is_banned(&self, cell: CellCoord) -> bool {
        self.path_cells.contains(&cell) || self.safe_zone.contains(&cell)
    }

    /// Lightning may only strike the path, and never inside the safe zone.
    pub fn is_lightning_target(&self, cell: CellCoord) -> bool {
        self.path_cells.contains(&cell) && !self.safe_zone.contains(&cell)
    }

    pub fn tower_at(&self, cell: CellCoord) -> Option<Entity> {
        self.occupied.get(&cell).copied()
    }

    /// Full legality check for placing a tower costing `price`.
    pub fn check(&self, cell: CellCoord, price: u32, gold: u32) -> Result<(), PlacementError> {
        if !cell.within(self.columns, self.rows) {
            return Err(PlacementError::OutOfGrid);
        }
        if self.occupied.contains_key(&cell) {
            return Err(PlacementError::Occupied);
        }
        if self.is_banned(cell) {
            return Err(PlacementError::Banned);
        }
        if gold < price {
            return Err(PlacementError::InsufficientGold { price, gold });
        }
        Ok(())
    }

    pub fn occupy(&mut self, cell: CellCoord, tower: Entity) {
        self.occupied.insert(cell, tower);
    }

    /// Free a cell, returning the tower that stood on it.
    pub fn vacate(&mut self, cell: CellCoord) -> Option<Entity> {
        self.occupied.remove(&cell)
    }

    /// Every banned cell, sorted.
    pub fn banned_cells(&self) -> Vec<CellCoord> {
        self.path_cells.union(&self.safe_zone).copied().collect()
    }

    /// Cells a tower could stand on if gold were no object, sorted.
    pub fn free_cells(&self) -> Vec<CellCoord> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| !self.is_banned(*cell) && !self.occupied.contains_key(cell))
            .collect()
    }
}

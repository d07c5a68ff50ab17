//! Player commands sent from a front end to the simulation.
//!
//! Commands are queued and processed at the start of the next step. The
//! engine's `try_*` methods perform the same actions synchronously and
//! report whether they were accepted.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::CellCoord;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Building ---
    /// Buy and place a tower on an empty, unbanned cell.
    PlaceTower { cell: CellCoord, kind: TowerKind },
    /// Sell the tower standing on `cell`.
    SellTower { cell: CellCoord },

    // --- Spells ---
    /// Pick a spell from the shop. Arms lightning targeting; buys vision
    /// and fairy outright.
    SelectSpell { kind: SpellKind },
    /// Cast a targeted spell on a cell.
    CastSpell { kind: SpellKind, cell: CellCoord },
    /// Upgrade a levelled spell or buy a timed one.
    PurchaseSpell { kind: SpellKind },

    // --- Waves ---
    /// Start the next wave once the current one is resolved.
    LaunchWave,

    // --- Pointer ---
    /// Pixel-space cursor position, used for cursor vision.
    MoveCursor { x: f64, y: f64 },
    /// The cursor left the board.
    ClearCursor,

    // --- Simulation control ---
    Pause,
    Resume,
    /// Set time acceleration (clamped to 0..=4).
    SetTimeScale { scale: f64 },
}

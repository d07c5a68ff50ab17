//! Game state snapshot: everything a renderer or UI needs after a frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{CellCoord, SimTime};

/// Complete visible game state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub paused: bool,
    pub gold: u32,
    pub lives: u32,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub explosions: Vec<ExplosionView>,
    pub spells: SpellView,
    /// Current shop price per tower kind.
    pub tower_prices: Vec<(TowerKind, u32)>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Last launched wave, 0 before the first launch.
    pub number: u32,
    pub max_wave: u32,
    pub resolved: bool,
    /// Seconds since the wave was launched.
    pub elapsed_secs: f64,
    pub night: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub phase: EnemyPhase,
    pub position: DVec2,
    pub health: u32,
    pub max_health: u32,
    pub visible: bool,
    pub remaining_distance: f64,
    /// Showing the shield-block reaction.
    pub blocking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u32,
    pub kind: TowerKind,
    pub cell: CellCoord,
    pub position: DVec2,
    pub phase: TowerPhase,
    pub range: f64,
    pub facing: f64,
    /// Spawn id of the current target, if it still exists.
    pub target_enemy: Option<u32>,
    pub price_paid: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub kind: ProjectileKind,
    pub position: DVec2,
    pub velocity: DVec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: DVec2,
    pub radius: f64,
    /// 0.0 at impact, 1.0 when the burst ends.
    pub progress: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellView {
    pub vision_level: u32,
    pub vision_radius: f64,
    /// Price of the next vision level, `None` at max level.
    pub vision_upgrade_price: Option<u32>,
    pub fairy_active: bool,
    pub fairy_remaining_secs: f64,
    pub lightning_armed: bool,
    /// Cells currently showing a lightning strike.
    pub lightning_cells: Vec<CellCoord>,
}

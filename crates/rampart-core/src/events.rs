//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::CellCoord;

/// Something worth a sound or a flash on screen. Drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveLaunched { wave: u32, enemies: u32 },
    /// Every enemy of the wave is dead or arrived.
    WaveResolved { wave: u32, reward: u32 },
    EnemyKilled {
        enemy_id: u32,
        kind: EnemyKind,
        bounty: u32,
    },
    /// An enemy reached the castle or the end of the path.
    EnemyArrived {
        enemy_id: u32,
        kind: EnemyKind,
        damage: u32,
    },
    /// A shielded enemy stopped an arrow.
    ArrowBlocked { enemy_id: u32 },
    TowerPlaced {
        tower_id: u32,
        kind: TowerKind,
        cell: CellCoord,
        price: u32,
    },
    TowerSold {
        tower_id: u32,
        kind: TowerKind,
        refund: u32,
    },
    /// A tower finished its wind-up and started the attack animation.
    TowerAttack { tower_id: u32, kind: TowerKind },
    ProjectileFired { kind: ProjectileKind },
    /// An interceptor bolt destroyed a catapult stone.
    ProjectileIntercepted,
    Explosion { x: f64, y: f64, radius: f64 },
    LightningStrike { cell: CellCoord, enemies_hit: u32 },
    SpellPurchased { kind: SpellKind, price: u32 },
    Victory,
    Defeat,
}

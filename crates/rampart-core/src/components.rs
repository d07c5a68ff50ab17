//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems; the only
//! methods here are small helpers over a component's own fields.

use glam::DVec2;
use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CellCoord, PathProgress};

/// Pixel-space position shared by every entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Hit points. `current` never drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    /// Fixed at spawn; used by heaviest-first targeting.
    pub max: u32,
}

impl Health {
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, flooring at zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

/// An enemy walking the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Spawn-order id, unique across the game.
    pub id: u32,
    pub kind: EnemyKind,
    pub phase: EnemyPhase,
    /// Wave this enemy belongs to.
    pub wave: u32,
    /// Seconds after wave launch at which the enemy starts walking.
    pub spawn_delay_secs: f64,
    /// Pixels per second.
    pub speed: f64,
    /// Lives lost when this enemy reaches the castle.
    pub contact_damage: u32,
    pub bounty: u32,
    /// Set once the enemy's death or arrival has been accounted for.
    /// A bounty is only ever paid while this is false.
    pub reward_settled: bool,
    /// Recomputed every frame from cursor, camps and the fairy.
    pub visible: bool,
    /// Arrows bounce off.
    pub shielded: bool,
    /// Remaining time of the block reaction after stopping an arrow.
    pub block_reaction_secs: f64,
    /// Arrows blocked so far.
    pub blocks: u32,
}

impl Enemy {
    /// Walking and still alive according to its phase.
    pub fn is_active(&self) -> bool {
        self.phase == EnemyPhase::Moving
    }
}

/// Path progress of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathFollower {
    pub progress: PathProgress,
}

/// Enemy mage ability to launch interceptor bolts at catapult stones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Caster {
    pub cooldown_secs: f64,
    pub since_last_cast_secs: f64,
    /// Maximum distance to the stone at launch, `None` for unlimited.
    pub range: Option<f64>,
}

impl Caster {
    pub fn is_ready(&self) -> bool {
        self.since_last_cast_secs >= self.cooldown_secs
    }
}

/// A placed tower.
#[derive(Debug, Clone)]
pub struct Tower {
    pub id: u32,
    pub kind: TowerKind,
    pub cell: CellCoord,
    /// Attack range, or light radius for a camp.
    pub range: f64,
    pub phase: TowerPhase,
    pub phase_elapsed_secs: f64,
    pub since_last_shot_secs: f64,
    /// Weak handle, re-validated before every use.
    pub target: Option<Entity>,
    /// Facing in radians, tracked toward the target while attacking.
    pub facing: f64,
    /// Price paid at placement; the sale refund is half of it.
    pub price_paid: u32,
}

/// What a projectile homes on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectileTarget {
    #[default]
    None,
    Enemy(Entity),
    Projectile(Entity),
}

/// A projectile in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    /// Speed times heading.
    pub velocity: DVec2,
    pub speed: f64,
    pub damage: u32,
    pub collision_radius: f64,
    /// Destroyed once `traveled` reaches this, if set.
    pub max_range: Option<f64>,
    pub traveled: f64,
    /// Area damage radius on impact, if any.
    pub splash_radius: Option<f64>,
    pub target: ProjectileTarget,
    pub destroyed: bool,
}

/// Transient burst left behind by an area-of-effect impact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub radius: f64,
    pub elapsed_secs: f64,
    pub duration_secs: f64,
}

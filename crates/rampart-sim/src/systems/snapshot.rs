//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{Path, SimTime};

use crate::economy::Economy;

/// Build a complete GameStateSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    path: &Path,
    time: &SimTime,
    phase: GamePhase,
    paused: bool,
    economy: &Economy,
    wave: WaveView,
    spells: SpellView,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        paused,
        gold: economy.gold,
        lives: economy.lives,
        wave,
        enemies: build_enemies(world, path),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        explosions: build_explosions(world),
        spells,
        tower_prices: economy.price_list(),
        events,
    }
}

/// All enemies still in the world, in spawn order.
pub fn build_enemies(world: &World, path: &Path) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Health, &Position, &PathFollower)>()
        .iter()
        .map(|(_, (enemy, health, pos, follower))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            phase: enemy.phase,
            position: pos.0,
            health: health.current,
            max_health: health.max,
            visible: enemy.visible,
            remaining_distance: path.remaining_distance(&follower.progress),
            blocking: enemy.block_reaction_secs > 0.0,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

/// All towers, in placement order.
pub fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (tower, pos))| TowerView {
            id: tower.id,
            kind: tower.kind,
            cell: tower.cell,
            position: pos.0,
            phase: tower.phase,
            range: tower.range,
            facing: tower.facing,
            target_enemy: tower
                .target
                .and_then(|target| world.get::<&Enemy>(target).ok().map(|e| e.id)),
            price_paid: tower.price_paid,
        })
        .collect();
    towers.sort_by_key(|t| t.id);
    towers
}

/// Projectiles still in flight.
pub fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.destroyed)
        .map(|(_, (projectile, pos))| ProjectileView {
            kind: projectile.kind,
            position: pos.0,
            velocity: projectile.velocity,
        })
        .collect()
}

pub fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Explosion, &Position)>()
        .iter()
        .map(|(_, (explosion, pos))| ExplosionView {
            position: pos.0,
            radius: explosion.radius,
            progress: if explosion.duration_secs > 0.0 {
                (explosion.elapsed_secs / explosion.duration_secs).min(1.0)
            } else {
                1.0
            },
        })
        .collect()
}

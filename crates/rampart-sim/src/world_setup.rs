//! Entity spawn factories.
//!
//! Builds the component bundles for enemies, towers, projectiles and
//! explosion bursts from the injected stat tables.

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::{EnemyStats, ProjectileStats, TowerStats};
use rampart_core::enums::*;
use rampart_core::types::{CellCoord, Path};

use crate::guidance;

/// Spawn a dormant enemy at the start of the path.
pub fn spawn_enemy(
    world: &mut World,
    id: u32,
    kind: EnemyKind,
    wave: u32,
    spawn_delay_secs: f64,
    stats: &EnemyStats,
    path: &Path,
) -> Entity {
    let enemy = Enemy {
        id,
        kind,
        phase: EnemyPhase::Dormant,
        wave,
        spawn_delay_secs,
        speed: stats.speed,
        contact_damage: stats.contact_damage,
        bounty: stats.bounty,
        reward_settled: false,
        visible: false,
        shielded: stats.shielded,
        block_reaction_secs: 0.0,
        blocks: 0,
    };
    let entity = world.spawn((
        enemy,
        Position(path.start()),
        Health::full(stats.health),
        PathFollower::default(),
    ));

    if let Some(caster) = &stats.caster {
        let _ = world.insert_one(
            entity,
            Caster {
                cooldown_secs: caster.cooldown_secs,
                // Ready to react as soon as it walks.
                since_last_cast_secs: caster.cooldown_secs,
                range: caster.range,
            },
        );
    }

    entity
}

/// Spawn a tower at the centre of `cell`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_tower(
    world: &mut World,
    id: u32,
    kind: TowerKind,
    cell: CellCoord,
    stats: &TowerStats,
    tile_size: f64,
    price_paid: u32,
) -> Entity {
    let tower = Tower {
        id,
        kind,
        cell,
        range: stats.range,
        phase: TowerPhase::Idle,
        phase_elapsed_secs: 0.0,
        // A fresh tower is ready to shoot.
        since_last_shot_secs: stats.cooldown_secs,
        target: None,
        facing: 0.0,
        price_paid,
    };
    world.spawn((tower, Position(cell.center(tile_size))))
}

/// Spawn a projectile at `origin` heading for `aim_point`.
pub fn spawn_projectile(
    world: &mut World,
    kind: ProjectileKind,
    stats: &ProjectileStats,
    origin: DVec2,
    aim_point: DVec2,
    target: ProjectileTarget,
) -> Entity {
    let projectile = Projectile {
        kind,
        velocity: guidance::pursuit_velocity(origin, aim_point, stats.speed),
        speed: stats.speed,
        damage: stats.damage,
        collision_radius: stats.collision_radius,
        max_range: stats.max_range,
        traveled: 0.0,
        splash_radius: stats.splash_radius,
        target,
        destroyed: false,
    };
    world.spawn((projectile, Position(origin)))
}

/// Spawn a short-lived explosion burst.
pub fn spawn_explosion(world: &mut World, at: DVec2, radius: f64, duration_secs: f64) -> Entity {
    world.spawn((
        Explosion {
            radius,
            elapsed_secs: 0.0,
            duration_secs,
        },
        Position(at),
    ))
}

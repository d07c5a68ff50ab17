//! Impact system: projectile collisions and damage.
//!
//! Direct hits damage the struck enemy, orbs splash every enemy around the
//! impact point, arrows bounce off shields, and interceptor bolts destroy
//! the stone they were chasing. A projectile resolves at most one impact.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use rampart_core::components::*;
use rampart_core::config::GameConfig;
use rampart_core::constants::BLOCK_REACTION_SECS;
use rampart_core::enums::ProjectileKind;
use rampart_core::events::GameEvent;

use crate::world_setup;

/// An enemy that can still be hit this frame.
struct Hittable {
    entity: Entity,
    id: u32,
    position: DVec2,
    shielded: bool,
    alive: bool,
}

/// Resolve collisions for every projectile still in flight.
pub fn run(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let mut enemies: Vec<Hittable> = world
        .query::<(&Enemy, &Health, &Position)>()
        .iter()
        .filter(|(_, (enemy, health, _))| enemy.is_active() && !health.is_dead())
        .map(|(entity, (enemy, _, pos))| Hittable {
            entity,
            id: enemy.id,
            position: pos.0,
            shielded: enemy.shielded,
            alive: true,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);

    let projectiles: Vec<(Entity, Projectile, DVec2)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.destroyed)
        .map(|(entity, (projectile, pos))| (entity, projectile.clone(), pos.0))
        .collect();

    let mut explosions: Vec<(DVec2, f64)> = Vec::new();

    for (entity, projectile, at) in projectiles {
        // Destroyed earlier in this pass (a stone hit by a bolt).
        if is_destroyed(world, entity) {
            continue;
        }

        let hit = match projectile.kind {
            ProjectileKind::InterceptorBolt => resolve_bolt(world, &projectile, at, events),
            _ => resolve_enemy_hit(world, &projectile, at, &mut enemies, &mut explosions, events),
        };

        if hit {
            mark_destroyed(world, entity);
        }
    }

    for (at, radius) in explosions {
        world_setup::spawn_explosion(world, at, radius, config.projectiles.explosion_secs);
    }
}

/// Returns true when the bolt caught its stone. Both are destroyed.
fn resolve_bolt(
    world: &World,
    bolt: &Projectile,
    at: DVec2,
    events: &mut Vec<GameEvent>,
) -> bool {
    let ProjectileTarget::Projectile(stone) = bolt.target else {
        return false;
    };
    let stone_pos = match world.get::<&Position>(stone) {
        Ok(p) => p.0,
        Err(_) => return false,
    };
    if is_destroyed(world, stone) || at.distance(stone_pos) > bolt.collision_radius {
        return false;
    }

    mark_destroyed(world, stone);
    debug!("interceptor bolt destroyed a stone");
    events.push(GameEvent::ProjectileIntercepted);
    true
}

/// Returns true when the projectile struck an enemy.
fn resolve_enemy_hit(
    world: &World,
    projectile: &Projectile,
    at: DVec2,
    enemies: &mut [Hittable],
    explosions: &mut Vec<(DVec2, f64)>,
    events: &mut Vec<GameEvent>,
) -> bool {
    // Nearest struck enemy; `enemies` is in spawn order so ties keep the
    // earlier spawn.
    let mut struck: Option<(usize, f64)> = None;
    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.alive {
            continue;
        }
        let distance = at.distance(enemy.position);
        if distance <= projectile.collision_radius
            && struck.map_or(true, |(_, best)| distance < best)
        {
            struck = Some((index, distance));
        }
    }
    let Some((index, _)) = struck else {
        return false;
    };

    if let Some(radius) = projectile.splash_radius {
        for (i, enemy) in enemies.iter_mut().enumerate().filter(|(_, e)| e.alive) {
            if i == index || at.distance(enemy.position) <= radius {
                enemy.alive = damage(world, enemy.entity, projectile.damage);
            }
        }
        explosions.push((at, radius));
        events.push(GameEvent::Explosion {
            x: at.x,
            y: at.y,
            radius,
        });
        return true;
    }

    let enemy = &mut enemies[index];
    if projectile.kind == ProjectileKind::Arrow && enemy.shielded {
        if let Ok(mut blocker) = world.get::<&mut Enemy>(enemy.entity) {
            blocker.block_reaction_secs = BLOCK_REACTION_SECS;
            blocker.blocks += 1;
        }
        events.push(GameEvent::ArrowBlocked { enemy_id: enemy.id });
        return true;
    }

    enemy.alive = damage(world, enemy.entity, projectile.damage);
    true
}

/// Apply damage; returns whether the enemy is still alive.
fn damage(world: &World, enemy: Entity, amount: u32) -> bool {
    match world.get::<&mut Health>(enemy) {
        Ok(mut health) => {
            health.apply_damage(amount);
            !health.is_dead()
        }
        Err(_) => false,
    }
}

fn is_destroyed(world: &World, projectile: Entity) -> bool {
    world
        .get::<&Projectile>(projectile)
        .map_or(true, |p| p.destroyed)
}

fn mark_destroyed(world: &World, projectile: Entity) {
    if let Ok(mut p) = world.get::<&mut Projectile>(projectile) {
        p.destroyed = true;
    }
}

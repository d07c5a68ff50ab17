//! Projectile kinematics: homing, integration and range cutoff.
//!
//! A projectile re-aims at its target every frame while the target is
//! alive. Once the target is gone the heading freezes and the projectile
//! flies straight on until it hits something or runs out of range.

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::*;

use crate::guidance;

/// Per-projectile steering decided in the read pass.
enum Steering {
    /// Keep the current velocity.
    Hold,
    /// Re-aim at this point.
    Toward(DVec2),
    /// The projectile lost its reason to exist (bolt whose stone is gone).
    Destroy,
}

/// Move every live projectile by `dt`.
pub fn run(world: &mut World, dt: f64) {
    // Collect steering first (avoid borrow conflicts with hecs)
    let mut steering: Vec<(Entity, Steering)> = Vec::new();
    {
        let mut query = world.query::<&Projectile>();
        for (entity, projectile) in query.iter() {
            if projectile.destroyed {
                continue;
            }
            let decision = match projectile.target {
                ProjectileTarget::None => Steering::Hold,
                ProjectileTarget::Enemy(target) => match live_enemy_position(world, target) {
                    Some(at) => Steering::Toward(at),
                    None => Steering::Hold,
                },
                ProjectileTarget::Projectile(target) => {
                    match live_projectile_position(world, target, entity) {
                        Some(at) => Steering::Toward(at),
                        None => Steering::Destroy,
                    }
                }
            };
            steering.push((entity, decision));
        }
    }

    for (entity, decision) in steering {
        let Ok((projectile, pos)) = world.query_one_mut::<(&mut Projectile, &mut Position)>(entity)
        else {
            continue;
        };

        match decision {
            Steering::Destroy => {
                projectile.destroyed = true;
                continue;
            }
            Steering::Toward(at) => {
                projectile.velocity = guidance::pursuit_velocity(pos.0, at, projectile.speed);
            }
            Steering::Hold => {}
        }

        pos.0 += projectile.velocity * dt;
        projectile.traveled += projectile.speed * dt;

        if let Some(max_range) = projectile.max_range {
            if projectile.traveled >= max_range {
                projectile.destroyed = true;
            }
        }
    }
}

/// Position of an enemy that is still walking and alive.
fn live_enemy_position(world: &World, target: Entity) -> Option<DVec2> {
    let enemy = world.get::<&Enemy>(target).ok()?;
    let health = world.get::<&Health>(target).ok()?;
    if !enemy.is_active() || health.is_dead() {
        return None;
    }
    world.get::<&Position>(target).ok().map(|p| p.0)
}

/// Position of a projectile that has not been destroyed.
fn live_projectile_position(world: &World, target: Entity, shooter: Entity) -> Option<DVec2> {
    if target == shooter {
        return None;
    }
    let projectile = world.get::<&Projectile>(target).ok()?;
    if projectile.destroyed {
        return None;
    }
    world.get::<&Position>(target).ok().map(|p| p.0)
}

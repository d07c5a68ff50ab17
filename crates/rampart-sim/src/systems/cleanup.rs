//! Cleanup system: removes finished entities at the end of the frame.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Explosion, Projectile};

/// Despawn dead or arrived enemies, destroyed projectiles and finished
/// explosions. Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if enemy.phase.is_terminal() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if explosion.elapsed_secs >= explosion.duration_secs {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

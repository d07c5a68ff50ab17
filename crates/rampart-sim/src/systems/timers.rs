//! Per-frame timers on enemies and effects.

use hecs::World;

use rampart_core::components::{Caster, Enemy, Explosion};

/// Advance caster cooldowns, block reactions and explosion lifetimes.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, caster) in world.query_mut::<&mut Caster>() {
        caster.since_last_cast_secs += dt;
    }

    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if enemy.block_reaction_secs > 0.0 {
            enemy.block_reaction_secs = (enemy.block_reaction_secs - dt).max(0.0);
        }
    }

    for (_entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.elapsed_secs += dt;
    }
}

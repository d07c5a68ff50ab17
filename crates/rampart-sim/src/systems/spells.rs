//! Spell effects on the world.

use hecs::World;

use rampart_core::components::{Enemy, Health, Position};
use rampart_core::config::SpellConfig;
use rampart_core::types::CellCoord;

use crate::spellbook::SpellBook;

/// Strike every walking, living enemy inside `cell` (edges included).
/// Returns how many enemies were hit.
pub fn lightning_strike(world: &mut World, cell: CellCoord, tile_size: f64, damage: u32) -> u32 {
    let mut hits = 0;
    for (_entity, (enemy, health, pos)) in world.query_mut::<(&Enemy, &mut Health, &Position)>() {
        if enemy.is_active() && !health.is_dead() && cell.contains(pos.0, tile_size) {
            health.apply_damage(damage);
            hits += 1;
        }
    }
    hits
}

/// Expire timed spell effects.
pub fn run(spells: &mut SpellBook, now: f64, config: &SpellConfig) {
    spells.expire(now, config);
}

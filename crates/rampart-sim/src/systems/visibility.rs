//! Visibility system: at night an enemy can only be targeted while lit.
//!
//! Lit means within the cursor's vision radius, within a camp's light
//! radius, or anywhere while the fairy is active.

use glam::DVec2;
use hecs::World;

use rampart_core::components::{Enemy, Position, Tower};
use rampart_core::enums::TowerKind;

/// Inputs for one visibility pass.
pub struct Lighting {
    pub cursor: Option<DVec2>,
    pub cursor_radius: f64,
    /// Fairy reveal: everything is visible.
    pub reveal_all: bool,
}

/// Recompute the `visible` flag of every enemy.
pub fn run(world: &mut World, lighting: &Lighting) {
    let camps: Vec<(DVec2, f64)> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .filter(|(_, (tower, _))| tower.kind == TowerKind::Camp)
        .map(|(_, (tower, pos))| (pos.0, tower.range))
        .collect();

    for (_entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &Position)>() {
        enemy.visible = is_lit(pos.0, lighting, &camps);
    }
}

fn is_lit(point: DVec2, lighting: &Lighting, camps: &[(DVec2, f64)]) -> bool {
    if lighting.reveal_all {
        return true;
    }
    if let Some(cursor) = lighting.cursor {
        if cursor.distance(point) <= lighting.cursor_radius {
            return true;
        }
    }
    camps
        .iter()
        .any(|(center, radius)| center.distance(point) <= *radius)
}

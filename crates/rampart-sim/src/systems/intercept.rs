//! Enemy mage interception.
//!
//! When a catapult releases a stone, the closest walking mage whose cast
//! is ready answers with an interceptor bolt homing on that stone.

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use rampart_core::components::*;
use rampart_core::config::GameConfig;
use rampart_core::enums::ProjectileKind;
use rampart_core::events::GameEvent;

use crate::world_setup;

/// Launch at most one bolt at `stone`. Returns the bolt, if any.
pub fn react_to_stone(
    world: &mut World,
    stone: Entity,
    stone_pos: DVec2,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) -> Option<Entity> {
    let caster = world
        .query::<(&Enemy, &Health, &Position, &Caster)>()
        .iter()
        .filter(|(_, (enemy, health, _, caster))| {
            enemy.is_active() && !health.is_dead() && caster.is_ready()
        })
        .filter(|(_, (_, _, pos, caster))| {
            caster
                .range
                .map_or(true, |range| pos.0.distance(stone_pos) <= range)
        })
        .map(|(entity, (enemy, _, pos, _))| (entity, enemy.id, pos.0, pos.0.distance(stone_pos)))
        .min_by(|a, b| a.3.total_cmp(&b.3).then(a.1.cmp(&b.1)));

    let (mage, mage_id, mage_pos, _) = caster?;

    if let Ok(mut caster) = world.get::<&mut Caster>(mage) {
        caster.since_last_cast_secs = 0.0;
    }

    let bolt = world_setup::spawn_projectile(
        world,
        ProjectileKind::InterceptorBolt,
        config.projectiles.get(ProjectileKind::InterceptorBolt),
        mage_pos,
        stone_pos,
        ProjectileTarget::Projectile(stone),
    );
    debug!(mage = mage_id, "mage launched an interceptor bolt");
    events.push(GameEvent::ProjectileFired {
        kind: ProjectileKind::InterceptorBolt,
    });
    Some(bolt)
}

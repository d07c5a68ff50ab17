//! Fire control: steps every attacking tower through its attack cycle and
//! releases projectiles.
//!
//! Target selection runs against a candidate list built once per frame in
//! spawn order. Projectiles are spawned after the tower pass so the world
//! is never mutated while it is being queried.

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::GameConfig;
use rampart_core::enums::*;
use rampart_core::events::GameEvent;
use rampart_core::types::Path;
use rampart_tower_ai::fsm::{self, TowerAction, TowerContext};
use rampart_tower_ai::profiles::get_profile;
use rampart_tower_ai::targeting::{select_target, Candidate};

use crate::guidance;
use crate::systems::intercept;
use crate::world_setup;

/// A shot decided during the tower pass.
struct FireOrder {
    origin: DVec2,
    projectile: ProjectileKind,
    target: Entity,
    aim_point: DVec2,
}

/// Build the targeting candidates: every walking enemy, in spawn order.
pub fn collect_candidates(world: &World, path: &Path) -> Vec<Candidate<Entity>> {
    let mut rows: Vec<(u32, Candidate<Entity>)> = world
        .query::<(&Enemy, &Health, &Position, &PathFollower)>()
        .iter()
        .filter(|(_, (enemy, _, _, _))| enemy.is_active())
        .map(|(entity, (enemy, health, pos, follower))| {
            (
                enemy.id,
                Candidate {
                    handle: entity,
                    position: pos.0,
                    alive: !health.is_dead(),
                    visible: enemy.visible,
                    remaining_distance: path.remaining_distance(&follower.progress),
                    max_health: health.max,
                },
            )
        })
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows.into_iter().map(|(_, c)| c).collect()
}

/// Run one frame of every tower.
pub fn run(
    world: &mut World,
    path: &Path,
    config: &GameConfig,
    dt: f64,
    events: &mut Vec<GameEvent>,
) {
    let candidates = collect_candidates(world, path);
    let find = |handle: Entity| candidates.iter().find(|c| c.handle == handle);

    let mut orders: Vec<FireOrder> = Vec::new();

    for (_entity, (tower, pos)) in world.query_mut::<(&mut Tower, &Position)>() {
        let Some(profile) = get_profile(tower.kind, &config.towers) else {
            continue;
        };
        let origin = pos.0;
        let range = tower.range;

        let ctx = TowerContext {
            phase: tower.phase,
            phase_elapsed_secs: tower.phase_elapsed_secs,
            since_last_shot_secs: tower.since_last_shot_secs,
            target: tower.target,
        };
        let update = fsm::evaluate(
            &ctx,
            &profile.timing,
            dt,
            || select_target(profile.policy, origin, range, &candidates),
            |handle| {
                find(handle)
                    .is_some_and(|c| c.alive && c.position.distance(origin) <= range)
            },
        );

        tower.phase = update.new_phase;
        tower.phase_elapsed_secs = update.phase_elapsed_secs;
        tower.since_last_shot_secs = update.since_last_shot_secs;
        tower.target = update.target;

        // Keep facing the locked target while winding up and attacking.
        if let Some(target) = update.target.and_then(find) {
            tower.facing = guidance::facing_toward(origin, target.position);
        }

        match update.action {
            TowerAction::AttackStarted(_) => {
                events.push(GameEvent::TowerAttack {
                    tower_id: tower.id,
                    kind: tower.kind,
                });
            }
            TowerAction::Fire(handle) => {
                if let Some(target) = find(handle) {
                    tower.facing = guidance::facing_toward(origin, target.position);
                    orders.push(FireOrder {
                        origin,
                        projectile: profile.projectile,
                        target: handle,
                        aim_point: target.position,
                    });
                }
            }
            TowerAction::Wasted | TowerAction::None => {}
        }
    }

    for order in orders {
        let stats = config.projectiles.get(order.projectile);
        let projectile = world_setup::spawn_projectile(
            world,
            order.projectile,
            stats,
            order.origin,
            order.aim_point,
            ProjectileTarget::Enemy(order.target),
        );
        events.push(GameEvent::ProjectileFired {
            kind: order.projectile,
        });

        if order.projectile == ProjectileKind::Stone {
            intercept::react_to_stone(world, projectile, order.origin, config, events);
        }
    }
}

//! Bounty settlement.
//!
//! Runs after every damage source of the frame. An enemy whose health hit
//! zero pays its bounty once; the `reward_settled` flag guards every payout
//! and is already set for enemies absorbed by the castle.

use hecs::World;

use rampart_core::components::{Enemy, Health};
use rampart_core::enums::EnemyPhase;
use rampart_core::events::GameEvent;

use crate::economy::Economy;

/// Mark killed enemies Dead and pay their bounties.
pub fn run(world: &mut World, economy: &mut Economy, events: &mut Vec<GameEvent>) {
    for (_entity, (enemy, health)) in world.query_mut::<(&mut Enemy, &Health)>() {
        if enemy.phase != EnemyPhase::Moving || !health.is_dead() {
            continue;
        }
        enemy.phase = EnemyPhase::Dead;
        if enemy.reward_settled {
            continue;
        }
        enemy.reward_settled = true;
        economy.earn(enemy.bounty);
        events.push(GameEvent::EnemyKilled {
            enemy_id: enemy.id,
            kind: enemy.kind,
            bounty: enemy.bounty,
        });
    }
}

//! Castle damage: enemies that reach the end of the path or step into a
//! castle cell cost the player lives and pay no bounty.

use hecs::World;
use tracing::debug;

use rampart_core::components::{Enemy, Health, Position};
use rampart_core::enums::EnemyPhase;
use rampart_core::events::GameEvent;
use rampart_core::types::CellCoord;

use crate::economy::Economy;

/// Castle cells and the grid they live on.
pub struct CastleZone<'a> {
    pub cells: &'a [CellCoord],
    pub tile_size: f64,
    pub columns: u32,
    pub rows: u32,
}

/// Apply contact damage exactly once per enemy.
pub fn run(
    world: &mut World,
    zone: &CastleZone,
    economy: &mut Economy,
    events: &mut Vec<GameEvent>,
) {
    for (_entity, (enemy, health, pos)) in
        world.query_mut::<(&mut Enemy, &mut Health, &Position)>()
    {
        if enemy.reward_settled {
            continue;
        }

        let absorbed = match enemy.phase {
            EnemyPhase::Arrived => !health.is_dead(),
            EnemyPhase::Moving if !health.is_dead() => {
                CellCoord::from_point(pos.0, zone.tile_size, zone.columns, zone.rows)
                    .is_some_and(|cell| zone.cells.contains(&cell))
            }
            _ => false,
        };
        if !absorbed {
            continue;
        }

        // The castle kills what walks into it; arrivals stay Arrived.
        if enemy.phase == EnemyPhase::Moving {
            health.current = 0;
            enemy.phase = EnemyPhase::Dead;
        }
        enemy.reward_settled = true;
        let lives = economy.lose_lives(enemy.contact_damage);
        debug!(
            enemy = enemy.id,
            kind = ?enemy.kind,
            damage = enemy.contact_damage,
            lives,
            "enemy reached the castle"
        );
        events.push(GameEvent::EnemyArrived {
            enemy_id: enemy.id,
            kind: enemy.kind,
            damage: enemy.contact_damage,
        });
    }
}

//! Wave spawning system: populates a wave at launch and wakes its enemies
//! when their spawn delay has elapsed.

use hecs::World;

use rampart_core::components::Enemy;
use rampart_core::config::EnemyTable;
use rampart_core::enums::EnemyPhase;
use rampart_core::level::SpawnEntry;
use rampart_core::types::Path;

use crate::world_setup;

/// Progress of the current wave.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Last launched wave, 0 before the first launch.
    pub number: u32,
    /// Highest wave number in the level.
    pub max_wave: u32,
    /// Simulation time at which the wave was launched.
    pub started_at_secs: f64,
    /// The resolution reward for `number` has been paid.
    pub reward_paid: bool,
    /// Night falls at launch and lifts once the wave is resolved.
    pub night: bool,
}

impl WaveState {
    pub fn new(max_wave: u32) -> Self {
        Self {
            max_wave,
            ..Default::default()
        }
    }

    pub fn launched(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        self.number < self.max_wave
    }

    /// Seconds since launch, 0 before the first wave.
    pub fn elapsed(&self, now: f64) -> f64 {
        if self.launched() {
            (now - self.started_at_secs).max(0.0)
        } else {
            0.0
        }
    }
}

/// Spawn every enemy of a wave, dormant at the path start. Returns how
/// many were spawned.
pub fn populate(
    world: &mut World,
    wave: u32,
    entries: &[SpawnEntry],
    enemies: &EnemyTable,
    path: &Path,
    next_enemy_id: &mut u32,
) -> u32 {
    for entry in entries {
        world_setup::spawn_enemy(
            world,
            *next_enemy_id,
            entry.kind,
            wave,
            entry.spawn_delay_secs,
            enemies.get(entry.kind),
            path,
        );
        *next_enemy_id += 1;
    }
    entries.len() as u32
}

/// Activate dormant enemies whose spawn delay has been reached.
pub fn run(world: &mut World, wave: &WaveState, now: f64) {
    let elapsed = wave.elapsed(now);
    for (_entity, enemy) in world.query_mut::<&mut Enemy>() {
        if enemy.phase == EnemyPhase::Dormant
            && enemy.wave == wave.number
            && elapsed >= enemy.spawn_delay_secs
        {
            enemy.phase = EnemyPhase::Moving;
        }
    }
}

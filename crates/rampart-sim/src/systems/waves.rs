//! Wave resolution and victory.

use hecs::World;
use tracing::info;

use rampart_core::components::Enemy;
use rampart_core::config::EconomyConfig;
use rampart_core::events::GameEvent;

use crate::economy::Economy;
use crate::systems::wave_spawner::WaveState;

/// Outcome of a resolution check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveOutcome {
    /// The current wave still has enemies to deal with.
    Running,
    Resolved,
    /// The last wave is resolved.
    Victory,
}

/// True when no enemy of `wave` is dormant or walking. Trivially true
/// before the first wave.
pub fn is_resolved(world: &World, wave: u32) -> bool {
    if wave == 0 {
        return true;
    }
    !world
        .query::<&Enemy>()
        .iter()
        .any(|(_, enemy)| enemy.wave == wave && !enemy.phase.is_terminal())
}

/// Pay the wave reward once and report victory.
pub fn run(
    world: &World,
    wave: &mut WaveState,
    economy: &mut Economy,
    rewards: &EconomyConfig,
    events: &mut Vec<GameEvent>,
) -> WaveOutcome {
    if !wave.launched() || !is_resolved(world, wave.number) {
        return WaveOutcome::Running;
    }

    if !wave.reward_paid {
        let reward = rewards.wave_reward(wave.number);
        economy.earn(reward);
        wave.reward_paid = true;
        wave.night = false;
        info!(wave = wave.number, reward, gold = economy.gold, "wave resolved");
        events.push(GameEvent::WaveResolved {
            wave: wave.number,
            reward,
        });
    }

    if wave.number >= wave.max_wave {
        WaveOutcome::Victory
    } else {
        WaveOutcome::Resolved
    }
}

//! Tower attack finite state machine.
//!
//! Pure functions that step a tower through Idle → PreAttack → Attack → Idle.
//! No ECS dependency: the caller supplies target acquisition and target
//! validation as closures over whatever world it owns, and the handle type
//! `H` is opaque here.

use rampart_core::enums::TowerPhase;

use crate::profiles::AttackTiming;

/// Input to the tower FSM for a single tower.
#[derive(Debug, Clone, Copy)]
pub struct TowerContext<H> {
    pub phase: TowerPhase,
    pub phase_elapsed_secs: f64,
    pub since_last_shot_secs: f64,
    /// Target captured when the wind-up started.
    pub target: Option<H>,
}

/// What the tower does this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowerAction<H> {
    None,
    /// Wind-up finished; the attack animation starts against this target.
    AttackStarted(H),
    /// Release a projectile at this target.
    Fire(H),
    /// The attack finished but the target was gone or out of range.
    Wasted,
}

/// Output from the tower FSM.
#[derive(Debug, Clone, Copy)]
pub struct TowerUpdate<H> {
    pub new_phase: TowerPhase,
    pub phase_elapsed_secs: f64,
    pub since_last_shot_secs: f64,
    pub target: Option<H>,
    pub action: TowerAction<H>,
    pub phase_changed: bool,
}

/// Advance one tower by `dt` seconds.
///
/// `acquire` runs target selection and is only called from Idle once the
/// cooldown has elapsed. `still_valid` re-checks the captured target when
/// the attack completes.
pub fn evaluate<H: Copy>(
    ctx: &TowerContext<H>,
    timing: &AttackTiming,
    dt: f64,
    acquire: impl FnOnce() -> Option<H>,
    still_valid: impl FnOnce(H) -> bool,
) -> TowerUpdate<H> {
    match ctx.phase {
        TowerPhase::Idle => evaluate_idle(ctx, timing, dt, acquire),
        TowerPhase::PreAttack => evaluate_pre_attack(ctx, timing, dt),
        TowerPhase::Attack => evaluate_attack(ctx, timing, dt, still_valid),
    }
}

fn evaluate_idle<H: Copy>(
    ctx: &TowerContext<H>,
    timing: &AttackTiming,
    dt: f64,
    acquire: impl FnOnce() -> Option<H>,
) -> TowerUpdate<H> {
    let since_last_shot = ctx.since_last_shot_secs + dt;
    let waiting = TowerUpdate {
        new_phase: TowerPhase::Idle,
        phase_elapsed_secs: ctx.phase_elapsed_secs + dt,
        since_last_shot_secs: since_last_shot,
        target: None,
        action: TowerAction::None,
        phase_changed: false,
    };

    if since_last_shot < timing.cooldown_secs {
        return waiting;
    }

    let Some(target) = acquire() else {
        return waiting;
    };

    // Mage towers skip the wind-up entirely.
    if timing.instant_fire {
        return TowerUpdate {
            new_phase: TowerPhase::Idle,
            phase_elapsed_secs: 0.0,
            since_last_shot_secs: 0.0,
            target: None,
            action: TowerAction::Fire(target),
            phase_changed: false,
        };
    }

    TowerUpdate {
        new_phase: TowerPhase::PreAttack,
        phase_elapsed_secs: 0.0,
        since_last_shot_secs: since_last_shot,
        target: Some(target),
        action: TowerAction::None,
        phase_changed: true,
    }
}

fn evaluate_pre_attack<H: Copy>(
    ctx: &TowerContext<H>,
    timing: &AttackTiming,
    dt: f64,
) -> TowerUpdate<H> {
    let elapsed = ctx.phase_elapsed_secs + dt;
    if elapsed < timing.windup_secs {
        return TowerUpdate {
            new_phase: TowerPhase::PreAttack,
            phase_elapsed_secs: elapsed,
            since_last_shot_secs: ctx.since_last_shot_secs,
            target: ctx.target,
            action: TowerAction::None,
            phase_changed: false,
        };
    }

    TowerUpdate {
        new_phase: TowerPhase::Attack,
        phase_elapsed_secs: 0.0,
        since_last_shot_secs: ctx.since_last_shot_secs,
        target: ctx.target,
        action: match ctx.target {
            Some(target) => TowerAction::AttackStarted(target),
            None => TowerAction::None,
        },
        phase_changed: true,
    }
}

fn evaluate_attack<H: Copy>(
    ctx: &TowerContext<H>,
    timing: &AttackTiming,
    dt: f64,
    still_valid: impl FnOnce(H) -> bool,
) -> TowerUpdate<H> {
    let elapsed = ctx.phase_elapsed_secs + dt;
    if elapsed < timing.attack_secs {
        return TowerUpdate {
            new_phase: TowerPhase::Attack,
            phase_elapsed_secs: elapsed,
            since_last_shot_secs: ctx.since_last_shot_secs,
            target: ctx.target,
            action: TowerAction::None,
            phase_changed: false,
        };
    }

    // Back to Idle either way. A wasted cycle keeps the cooldown timer, so
    // the tower looks for a new target on the next frame.
    let (action, since_last_shot) = match ctx.target {
        Some(target) if still_valid(target) => (TowerAction::Fire(target), 0.0),
        _ => (TowerAction::Wasted, ctx.since_last_shot_secs),
    };

    TowerUpdate {
        new_phase: TowerPhase::Idle,
        phase_elapsed_secs: 0.0,
        since_last_shot_secs: since_last_shot,
        target: None,
        action,
        phase_changed: true,
    }
}

//! Kind-specific attack profiles.
//!
//! Consolidates the per-kind parameters the tower FSM and targeting need.
//! Range lives on the placed `Tower`, which is what targeting reads.

use rampart_core::config::TowerTable;
use rampart_core::enums::{ProjectileKind, TargetPolicy, TowerKind};

/// Timing of one attack cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackTiming {
    pub cooldown_secs: f64,
    pub windup_secs: f64,
    pub attack_secs: f64,
    /// Fire straight from Idle when the cooldown expires.
    pub instant_fire: bool,
}

/// Everything an attacking tower kind needs to run its cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub policy: TargetPolicy,
    pub projectile: ProjectileKind,
    pub timing: AttackTiming,
}

/// Get the attack profile for a tower kind. Passive towers have none.
pub fn get_profile(kind: TowerKind, towers: &TowerTable) -> Option<AttackProfile> {
    let stats = towers.get(kind);
    let policy = kind.target_policy()?;
    let projectile = kind.projectile()?;
    Some(AttackProfile {
        policy,
        projectile,
        timing: AttackTiming {
            cooldown_secs: stats.cooldown_secs,
            windup_secs: stats.windup_secs,
            attack_secs: stats.attack_secs,
            instant_fire: stats.instant_fire,
        },
    })
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use rampart_core::config::TowerTable;
    use rampart_core::enums::{ProjectileKind, TargetPolicy, TowerKind, TowerPhase};

    use crate::fsm::{evaluate, TowerAction, TowerContext};
    use crate::profiles::{get_profile, AttackTiming};
    use crate::targeting::{select_target, Candidate};

    const TIMING: AttackTiming = AttackTiming {
        cooldown_secs: 1.0,
        windup_secs: 0.3,
        attack_secs: 0.2,
        instant_fire: false,
    };

    fn idle(since_last_shot: f64) -> TowerContext<u32> {
        TowerContext {
            phase: TowerPhase::Idle,
            phase_elapsed_secs: 0.0,
            since_last_shot_secs: since_last_shot,
            target: None,
        }
    }

    fn candidate(handle: u32, distance_from_tower: f64, remaining: f64, max_health: u32) -> Candidate<u32> {
        Candidate {
            handle,
            position: DVec2::new(distance_from_tower, 0.0),
            alive: true,
            visible: true,
            remaining_distance: remaining,
            max_health,
        }
    }

    // ---- FSM ----

    #[test]
    fn test_idle_waits_for_cooldown() {
        let update = evaluate(&idle(0.5), &TIMING, 0.1, || Some(1), |_| true);
        assert_eq!(update.new_phase, TowerPhase::Idle);
        assert!(!update.phase_changed);
        assert!((update.since_last_shot_secs - 0.6).abs() < 1e-12);
        assert_eq!(update.action, TowerAction::None);
    }

    #[test]
    fn test_idle_does_not_select_before_cooldown() {
        let mut called = false;
        evaluate(
            &idle(0.0),
            &TIMING,
            0.1,
            || {
                called = true;
                Some(1)
            },
            |_| true,
        );
        assert!(!called, "target selection must wait for the cooldown");
    }

    #[test]
    fn test_idle_to_pre_attack_on_target() {
        let update = evaluate(&idle(0.95), &TIMING, 0.1, || Some(7), |_| true);
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, TowerPhase::PreAttack);
        assert_eq!(update.target, Some(7));
        assert_eq!(update.phase_elapsed_secs, 0.0);
    }

    #[test]
    fn test_idle_stays_without_target() {
        let update = evaluate(&idle(5.0), &TIMING, 0.1, || None, |_| true);
        assert_eq!(update.new_phase, TowerPhase::Idle);
        assert_eq!(update.target, None);
    }

    #[test]
    fn test_pre_attack_to_attack_invokes_hook() {
        let ctx = TowerContext {
            phase: TowerPhase::PreAttack,
            phase_elapsed_secs: 0.25,
            since_last_shot_secs: 1.0,
            target: Some(3u32),
        };
        let update = evaluate(&ctx, &TIMING, 0.1, || None, |_| true);
        assert_eq!(update.new_phase, TowerPhase::Attack);
        assert_eq!(update.action, TowerAction::AttackStarted(3));
        assert_eq!(update.target, Some(3));
    }

    #[test]
    fn test_attack_fires_at_valid_target() {
        let ctx = TowerContext {
            phase: TowerPhase::Attack,
            phase_elapsed_secs: 0.15,
            since_last_shot_secs: 1.0,
            target: Some(3u32),
        };
        let update = evaluate(&ctx, &TIMING, 0.1, || None, |h| h == 3);
        assert_eq!(update.new_phase, TowerPhase::Idle);
        assert_eq!(update.action, TowerAction::Fire(3));
        assert_eq!(update.since_last_shot_secs, 0.0, "cooldown restarts after a shot");
        assert_eq!(update.target, None);
    }

    #[test]
    fn test_attack_wasted_when_target_invalid() {
        let ctx = TowerContext {
            phase: TowerPhase::Attack,
            phase_elapsed_secs: 0.15,
            since_last_shot_secs: 1.0,
            target: Some(3u32),
        };
        let update = evaluate(&ctx, &TIMING, 0.1, || None, |_| false);
        assert_eq!(update.new_phase, TowerPhase::Idle);
        assert_eq!(update.action, TowerAction::Wasted);
        assert_eq!(
            update.since_last_shot_secs, 1.0,
            "a wasted cycle leaves the cooldown elapsed"
        );

        // Next frame it re-acquires immediately.
        let next = evaluate(&idle(update.since_last_shot_secs), &TIMING, 0.016, || Some(9), |_| true);
        assert_eq!(next.new_phase, TowerPhase::PreAttack);
        assert_eq!(next.target, Some(9));
    }

    #[test]
    fn test_instant_fire_skips_windup() {
        let timing = AttackTiming {
            instant_fire: true,
            ..TIMING
        };
        let update = evaluate(&idle(1.0), &timing, 0.1, || Some(4), |_| true);
        assert_eq!(update.new_phase, TowerPhase::Idle);
        assert_eq!(update.action, TowerAction::Fire(4));
        assert_eq!(update.since_last_shot_secs, 0.0);
    }

    #[test]
    fn test_full_cycle_timing() {
        let timing = AttackTiming {
            cooldown_secs: 1.0,
            windup_secs: 0.5,
            attack_secs: 0.25,
            instant_fire: false,
        };
        let mut ctx = idle(0.0);
        let mut fired_at = None;
        for step in 1..=20 {
            let update = evaluate(&ctx, &timing, 0.25, || Some(1u32), |_| true);
            if update.action == TowerAction::Fire(1) {
                fired_at = Some(step);
                break;
            }
            ctx = TowerContext {
                phase: update.new_phase,
                phase_elapsed_secs: update.phase_elapsed_secs,
                since_last_shot_secs: update.since_last_shot_secs,
                target: update.target,
            };
        }
        // 4 steps to cool down, 2 to wind up, 1 to attack.
        assert_eq!(fired_at, Some(7));
    }

    // ---- Targeting ----

    #[test]
    fn test_catapult_prefers_heaviest() {
        let candidates = [candidate(1, 100.0, 300.0, 60), candidate(2, 140.0, 500.0, 500)];
        let picked = select_target(TargetPolicy::HeaviestFirst, DVec2::ZERO, 150.0, &candidates);
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn test_archer_prefers_closest_to_goal() {
        let candidates = [candidate(1, 100.0, 300.0, 60), candidate(2, 140.0, 500.0, 500)];
        let picked = select_target(TargetPolicy::ClosestToGoal, DVec2::ZERO, 150.0, &candidates);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn test_heaviest_tie_breaks_on_remaining_distance() {
        let candidates = [candidate(1, 50.0, 400.0, 200), candidate(2, 60.0, 100.0, 200)];
        let picked = select_target(TargetPolicy::HeaviestFirst, DVec2::ZERO, 150.0, &candidates);
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn test_full_tie_keeps_spawn_order() {
        let candidates = [candidate(5, 50.0, 100.0, 60), candidate(6, 60.0, 100.0, 60)];
        for policy in [TargetPolicy::ClosestToGoal, TargetPolicy::HeaviestFirst] {
            assert_eq!(
                select_target(policy, DVec2::ZERO, 150.0, &candidates),
                Some(5),
                "{policy:?} should keep the first candidate on a full tie"
            );
        }
    }

    #[test]
    fn test_ineligible_candidates_skipped() {
        let mut hidden = candidate(1, 10.0, 10.0, 999);
        hidden.visible = false;
        let mut dead = candidate(2, 10.0, 5.0, 999);
        dead.alive = false;
        let far = candidate(3, 151.0, 1.0, 999);
        let edge = candidate(4, 150.0, 400.0, 10);
        let candidates = [hidden, dead, far, edge];
        assert_eq!(
            select_target(TargetPolicy::HeaviestFirst, DVec2::ZERO, 150.0, &candidates),
            Some(4),
            "range check is inclusive"
        );
        assert_eq!(
            select_target(TargetPolicy::ClosestToGoal, DVec2::ZERO, 100.0, &candidates),
            None
        );
    }

    // ---- Profiles ----

    #[test]
    fn test_profiles_from_default_table() {
        let towers = TowerTable::default();
        let catapult = get_profile(TowerKind::Catapult, &towers).unwrap();
        assert_eq!(catapult.policy, TargetPolicy::HeaviestFirst);
        assert_eq!(catapult.projectile, ProjectileKind::Stone);
        assert_eq!(catapult.timing.cooldown_secs, 2.0);

        let mage = get_profile(TowerKind::Mage, &towers).unwrap();
        assert!(mage.timing.instant_fire);
        assert_eq!(mage.projectile, ProjectileKind::MageOrb);

        assert!(get_profile(TowerKind::Camp, &towers).is_none());
    }
}

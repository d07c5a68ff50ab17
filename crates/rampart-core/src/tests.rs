#[cfg(test)]
mod tests {
    use glam::DVec2;

    use crate::commands::PlayerCommand;
    use crate::components::Health;
    use crate::config::{GameConfig, PriceCurve, PriceStep};
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::GameEvent;
    use crate::level::{LevelDefinition, WaveRow};
    use crate::state::GameStateSnapshot;
    use crate::types::{CellCoord, Path, PathProgress};

    fn l_path() -> Path {
        Path::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(100.0, 100.0),
        ])
        .unwrap()
    }

    fn row(enemy: &str, wave: u32, delay: f64) -> WaveRow {
        WaveRow {
            enemy: enemy.to_string(),
            wave,
            spawn_delay_secs: delay,
        }
    }

    fn level(waves: Vec<WaveRow>) -> LevelDefinition {
        LevelDefinition {
            name: "test".to_string(),
            path: vec![DVec2::new(0.0, 32.0), DVec2::new(320.0, 32.0)],
            waves,
            castle_cells: vec![],
            safe_zone: vec![],
        }
    }

    // ---- Path ----

    #[test]
    fn test_path_rejects_single_waypoint() {
        let err = Path::new(vec![DVec2::ZERO]).unwrap_err();
        assert!(matches!(err, ConfigError::PathTooShort { waypoints: 1 }));
    }

    #[test]
    fn test_path_rejects_non_finite_waypoint() {
        let err = Path::new(vec![DVec2::ZERO, DVec2::new(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteWaypoint { index: 1 }));
    }

    #[test]
    fn test_path_remaining_distance() {
        let path = l_path();
        assert_eq!(path.total_length(), 200.0);
        let start = PathProgress::default();
        assert_eq!(path.remaining_distance(&start), 200.0);
        let mid = PathProgress {
            segment: 1,
            into_segment: 50.0,
        };
        assert_eq!(path.remaining_distance(&mid), 50.0);
        let done = PathProgress {
            segment: path.last_index(),
            into_segment: 0.0,
        };
        assert_eq!(path.remaining_distance(&done), 0.0);
    }

    #[test]
    fn test_path_position_at_interpolates() {
        let path = l_path();
        let pos = path.position_at(&PathProgress {
            segment: 1,
            into_segment: 25.0,
        });
        assert_eq!(pos, DVec2::new(100.0, 25.0));
        let end = path.position_at(&PathProgress {
            segment: 2,
            into_segment: 0.0,
        });
        assert_eq!(end, path.end());
    }

    #[test]
    fn test_zero_length_segment_is_floored() {
        let path = Path::new(vec![DVec2::ONE, DVec2::ONE, DVec2::new(5.0, 1.0)]).unwrap();
        assert!(path.segment_length(0) > 0.0);
        let pos = path.position_at(&PathProgress::default());
        assert!(pos.is_finite());
    }

    #[test]
    fn test_covered_cells_follow_path() {
        // Straight along row 0 from column 0 to column 4.
        let path = Path::new(vec![DVec2::new(0.0, 32.0), DVec2::new(300.0, 32.0)]).unwrap();
        let cells = path.covered_cells(64.0, 12, 12);
        let expected: Vec<CellCoord> = (0..=4).map(|c| CellCoord::new(c, 0)).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_covered_cells_ignore_off_grid_points() {
        let path = Path::new(vec![DVec2::new(-100.0, 32.0), DVec2::new(70.0, 32.0)]).unwrap();
        let cells = path.covered_cells(64.0, 12, 12);
        assert_eq!(cells, vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]);
    }

    // ---- Cells ----

    #[test]
    fn test_cell_center_and_bounds() {
        let cell = CellCoord::new(2, 3);
        assert_eq!(cell.center(64.0), DVec2::new(160.0, 224.0));
        let (min, max) = cell.bounds(64.0);
        assert_eq!(min, DVec2::new(128.0, 192.0));
        assert_eq!(max, DVec2::new(192.0, 256.0));
        assert!(cell.contains(DVec2::new(192.0, 256.0), 64.0), "bounds are inclusive");
        assert!(!cell.contains(DVec2::new(192.1, 200.0), 64.0));
    }

    #[test]
    fn test_cell_from_point_off_grid() {
        assert_eq!(CellCoord::from_point(DVec2::new(-1.0, 5.0), 64.0, 12, 12), None);
        assert_eq!(CellCoord::from_point(DVec2::new(768.0, 5.0), 64.0, 12, 12), None);
        assert_eq!(
            CellCoord::from_point(DVec2::new(767.9, 5.0), 64.0, 12, 12),
            Some(CellCoord::new(11, 0))
        );
    }

    // ---- Health ----

    #[test]
    fn test_health_floors_at_zero() {
        let mut health = Health::full(30);
        health.apply_damage(20);
        assert_eq!(health.current, 10);
        assert!(!health.is_dead());
        health.apply_damage(500);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
        assert_eq!(health.max, 30, "max health never changes");
    }

    // ---- Enums ----

    #[test]
    fn test_enemy_kind_ids() {
        assert_eq!(EnemyKind::from_id("Goblin"), Some(EnemyKind::Goblin));
        assert_eq!(EnemyKind::from_id("gobelin"), Some(EnemyKind::Goblin));
        assert_eq!(EnemyKind::from_id(" loup "), Some(EnemyKind::Wolf));
        assert_eq!(EnemyKind::from_id("chevalier"), Some(EnemyKind::Knight));
        assert_eq!(EnemyKind::from_id("dragon"), None);
    }

    #[test]
    fn test_tower_kind_policies() {
        assert_eq!(
            TowerKind::Archer.target_policy(),
            Some(TargetPolicy::ClosestToGoal)
        );
        assert_eq!(
            TowerKind::Catapult.target_policy(),
            Some(TargetPolicy::HeaviestFirst)
        );
        assert_eq!(TowerKind::Mage.target_policy(), Some(TargetPolicy::ClosestToGoal));
        assert_eq!(TowerKind::Camp.target_policy(), None);
        assert_eq!(TowerKind::Camp.projectile(), None);
    }

    #[test]
    fn test_game_phase_serde() {
        for v in [
            GamePhase::Building,
            GamePhase::WaveInProgress,
            GamePhase::Victory,
            GamePhase::Defeat,
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.economy.starting_gold, 450);
        assert_eq!(config.economy.starting_lives, 100);
        assert_eq!(config.projectiles.stone.damage, 170);
        assert_eq!(config.towers.catapult.cooldown_secs, 2.0);
        assert_eq!(config.towers.catapult.range, 230.0);
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "economy": { "starting_gold": 1000 } }"#).unwrap();
        assert_eq!(config.economy.starting_gold, 1000);
        assert_eq!(config.economy.starting_lives, 100);
        assert_eq!(config.towers, GameConfig::default().towers);
    }

    #[test]
    fn test_config_rejects_bad_vision_table() {
        let err = GameConfig::from_json_str(
            r#"{ "spells": { "vision_max_level": 3, "vision_radius_multipliers": [1.0] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }), "got {err}");
    }

    #[test]
    fn test_config_rejects_zero_tile() {
        let err = GameConfig::from_json_str(r#"{ "grid": { "tile_size": 0.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("grid.tile_size"), "got {err}");
    }

    #[test]
    fn test_vision_radius_levels() {
        let config = GameConfig::default();
        assert_eq!(config.vision_radius(1), 100.0);
        assert_eq!(config.vision_radius(2), 125.0);
        assert_eq!(config.vision_radius(3), 150.0);
        // Out-of-range levels clamp to the table.
        assert_eq!(config.vision_radius(9), 150.0);
    }

    #[test]
    fn test_wave_rewards_table() {
        let economy = GameConfig::default().economy;
        assert_eq!(economy.wave_reward(0), 0);
        assert_eq!(economy.wave_reward(1), 35);
        assert_eq!(economy.wave_reward(9), 30);
        assert_eq!(economy.wave_reward(10), 20);
        assert_eq!(economy.wave_reward(11), 0);
    }

    // ---- Price curves ----

    #[test]
    fn test_additive_price_curve() {
        let curve = PriceCurve {
            on_buy: PriceStep::Add(2),
            on_sell: PriceStep::Add(-2),
            floor: 5,
        };
        assert_eq!(curve.after_purchase(20), 22);
        assert_eq!(curve.after_sale(22), 20);
        assert_eq!(curve.after_sale(6), 5, "sale never drops below the floor");
    }

    #[test]
    fn test_scaling_price_curve_rounding() {
        let curve = PriceCurve {
            on_buy: PriceStep::Scale(1.5),
            on_sell: PriceStep::Scale(0.6666),
            floor: 0,
        };
        assert_eq!(curve.after_purchase(100), 150);
        assert_eq!(curve.after_purchase(75), 112, "purchase scaling rounds down");
        assert_eq!(curve.after_sale(150), 100, "sale scaling rounds to nearest");
    }

    // ---- Levels ----

    #[test]
    fn test_level_wave_filter_is_sorted_and_stable() {
        let level = level(vec![
            row("rat", 1, 2.0),
            row("goblin", 1, 0.5),
            row("wolf", 2, 0.0),
            row("ogre", 1, 2.0),
        ]);
        let wave = level.wave(1);
        let kinds: Vec<EnemyKind> = wave.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EnemyKind::Goblin, EnemyKind::Rat, EnemyKind::Ogre]);
        assert_eq!(level.max_wave(), 2);
        assert!(level.wave(3).is_empty());
    }

    #[test]
    fn test_level_validation_errors() {
        let unknown = level(vec![row("dragon", 1, 0.0)]);
        assert!(matches!(
            unknown.validate(12, 12),
            Err(ConfigError::UnknownEnemyKind { row: 0, .. })
        ));

        let negative = level(vec![row("rat", 1, -1.0)]);
        assert!(matches!(
            negative.validate(12, 12),
            Err(ConfigError::InvalidSpawnDelay { .. })
        ));

        let zero = level(vec![row("rat", 0, 1.0)]);
        assert!(matches!(
            zero.validate(12, 12),
            Err(ConfigError::ZeroWaveNumber { row: 0 })
        ));

        let empty = level(vec![]);
        assert!(matches!(empty.validate(12, 12), Err(ConfigError::NoWaves { .. })));

        let mut off_grid = level(vec![row("rat", 1, 0.0)]);
        off_grid.castle_cells.push(CellCoord::new(12, 0));
        assert!(matches!(
            off_grid.validate(12, 12),
            Err(ConfigError::CellOutOfGrid { column: 12, .. })
        ));

        let mut short = level(vec![row("rat", 1, 0.0)]);
        short.path.truncate(1);
        assert!(matches!(
            short.validate(12, 12),
            Err(ConfigError::PathTooShort { .. })
        ));
    }

    #[test]
    fn test_level_json() {
        let json = r#"{
            "name": "meadow",
            "path": [[0.0, 32.0], [320.0, 32.0]],
            "waves": [
                { "enemy": "gobelin", "wave": 1, "spawn_delay_secs": 0.0 },
                { "enemy": "knight", "wave": 1, "spawn_delay_secs": 1.5 }
            ],
            "castle_cells": [{ "column": 4, "row": 0 }]
        }"#;
        let level = LevelDefinition::from_json_str(json).unwrap();
        let path = level.validate(12, 12).unwrap();
        assert_eq!(path.total_length(), 320.0);
        assert_eq!(level.wave(1)[1].kind, EnemyKind::Knight);
        assert!(level.safe_zone.is_empty());
    }

    // ---- Commands / events / snapshot ----

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::PlaceTower {
                cell: CellCoord::new(3, 4),
                kind: TowerKind::Catapult,
            },
            PlayerCommand::CastSpell {
                kind: SpellKind::Lightning,
                cell: CellCoord::new(1, 1),
            },
            PlayerCommand::LaunchWave,
            PlayerCommand::SetTimeScale { scale: 2.0 },
        ];
        for cmd in commands {
            let json = serde_json::to_string(&cmd).unwrap();
            assert!(json.contains("\"type\""), "commands are internally tagged");
            let _back: PlayerCommand = serde_json::from_str(&json).unwrap();
        }
    }

    #[test]
    fn test_game_event_tagged() {
        let event = GameEvent::EnemyKilled {
            enemy_id: 7,
            kind: EnemyKind::Rat,
            bounty: 3,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"EnemyKilled\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase, GamePhase::Building);
        assert!(back.enemies.is_empty());
    }
}

//! Game tuning tables.
//!
//! `GameConfig` is injected into the engine at construction and never
//! mutated afterwards. `Default` carries the canonical game values; a JSON
//! file may override any subset of them.

use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyKind, ProjectileKind, TowerKind};
use crate::error::ConfigError;

/// Complete tuning for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridConfig,
    pub economy: EconomyConfig,
    pub visibility: VisibilityConfig,
    pub enemies: EnemyTable,
    pub towers: TowerTable,
    pub projectiles: ProjectileTable,
    pub spells: SpellConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid.tile_size", self.grid.tile_size)?;
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(ConfigError::invalid("grid", "grid must have at least one cell"));
        }
        positive("visibility.cursor_radius", self.visibility.cursor_radius)?;

        for kind in EnemyKind::ALL {
            let stats = self.enemies.get(kind);
            positive(&format!("enemies.{kind:?}.speed"), stats.speed)?;
            if stats.health == 0 {
                return Err(ConfigError::invalid(
                    format!("enemies.{kind:?}.health"),
                    "must be at least 1",
                ));
            }
            if let Some(caster) = &stats.caster {
                non_negative(&format!("enemies.{kind:?}.caster.cooldown_secs"), caster.cooldown_secs)?;
                if let Some(range) = caster.range {
                    positive(&format!("enemies.{kind:?}.caster.range"), range)?;
                }
            }
        }

        for kind in TowerKind::ALL {
            let stats = self.towers.get(kind);
            positive(&format!("towers.{kind:?}.range"), stats.range)?;
            non_negative(&format!("towers.{kind:?}.cooldown_secs"), stats.cooldown_secs)?;
            non_negative(&format!("towers.{kind:?}.windup_secs"), stats.windup_secs)?;
            non_negative(&format!("towers.{kind:?}.attack_secs"), stats.attack_secs)?;
            stats.price_curve.validate(&format!("towers.{kind:?}.price_curve"))?;
        }

        for kind in [
            ProjectileKind::Arrow,
            ProjectileKind::Stone,
            ProjectileKind::MageOrb,
            ProjectileKind::InterceptorBolt,
        ] {
            let stats = self.projectiles.get(kind);
            positive(&format!("projectiles.{kind:?}.speed"), stats.speed)?;
            non_negative(
                &format!("projectiles.{kind:?}.collision_radius"),
                stats.collision_radius,
            )?;
            if let Some(range) = stats.max_range {
                positive(&format!("projectiles.{kind:?}.max_range"), range)?;
            }
            if let Some(radius) = stats.splash_radius {
                positive(&format!("projectiles.{kind:?}.splash_radius"), radius)?;
            }
        }
        non_negative("projectiles.explosion_secs", self.projectiles.explosion_secs)?;

        let spells = &self.spells;
        if spells.vision_max_level == 0 {
            return Err(ConfigError::invalid("spells.vision_max_level", "must be at least 1"));
        }
        if spells.vision_radius_multipliers.len() != spells.vision_max_level as usize {
            return Err(ConfigError::invalid(
                "spells.vision_radius_multipliers",
                format!(
                    "expected {} entries, one per vision level",
                    spells.vision_max_level
                ),
            ));
        }
        for multiplier in &spells.vision_radius_multipliers {
            positive("spells.vision_radius_multipliers", *multiplier)?;
        }
        positive("spells.fairy_duration_secs", spells.fairy_duration_secs)?;
        non_negative("spells.lightning_effect_secs", spells.lightning_effect_secs)?;

        Ok(())
    }

    /// Cursor vision radius at `level` (1-based), floored to whole pixels.
    pub fn vision_radius(&self, level: u32) -> f64 {
        let index = level.clamp(1, self.spells.vision_max_level) as usize - 1;
        let multiplier = self
            .spells
            .vision_radius_multipliers
            .get(index)
            .copied()
            .unwrap_or(1.0);
        (self.visibility.cursor_radius * multiplier).floor()
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and positive")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and non-negative")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    /// Cell edge in pixels.
    pub tile_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: GRID_COLUMNS,
            rows: GRID_ROWS,
            tile_size: TILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_gold: u32,
    pub starting_lives: u32,
    /// Reward for resolving wave `n` is entry `n - 1`; waves past the end pay nothing.
    pub wave_rewards: Vec<u32>,
}

impl EconomyConfig {
    pub fn wave_reward(&self, wave: u32) -> u32 {
        match wave {
            0 => 0,
            n => self.wave_rewards.get(n as usize - 1).copied().unwrap_or(0),
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            wave_rewards: WAVE_REWARDS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Cursor light radius at vision level 1.
    pub cursor_radius: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            cursor_radius: CURSOR_VISION_RADIUS,
        }
    }
}

/// Stats shared by every enemy of one kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub speed: f64,
    pub health: u32,
    pub contact_damage: u32,
    pub bounty: u32,
    #[serde(default)]
    pub shielded: bool,
    #[serde(default)]
    pub caster: Option<CasterStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasterStats {
    pub cooldown_secs: f64,
    #[serde(default)]
    pub range: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub wolf: EnemyStats,
    pub rat: EnemyStats,
    pub goblin: EnemyStats,
    pub mage: EnemyStats,
    pub ogre: EnemyStats,
    pub knight: EnemyStats,
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::Wolf => &self.wolf,
            EnemyKind::Rat => &self.rat,
            EnemyKind::Goblin => &self.goblin,
            EnemyKind::Mage => &self.mage,
            EnemyKind::Ogre => &self.ogre,
            EnemyKind::Knight => &self.knight,
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        let basic = |speed, health, contact_damage, bounty| EnemyStats {
            speed,
            health,
            contact_damage,
            bounty,
            shielded: false,
            caster: None,
        };
        Self {
            wolf: basic(100.0, 90, 2, 8),
            rat: basic(120.0, 30, 1, 3),
            goblin: basic(80.0, 60, 1, 5),
            mage: EnemyStats {
                caster: Some(CasterStats {
                    cooldown_secs: MAGE_CAST_COOLDOWN_SECS,
                    range: None,
                }),
                ..basic(70.0, 120, 3, 12)
            },
            ogre: basic(45.0, 500, 5, 30),
            knight: EnemyStats {
                shielded: true,
                ..basic(60.0, 200, 4, 20)
            },
        }
    }
}

/// One step of a price curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceStep {
    /// Add a fixed amount (negative to discount).
    Add(i64),
    /// Multiply by a factor.
    Scale(f64),
}

/// How a tower kind's price moves after each purchase and sale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceCurve {
    pub on_buy: PriceStep,
    pub on_sell: PriceStep,
    /// The price never drops below this.
    pub floor: u32,
}

impl PriceCurve {
    /// Price after one more tower of this kind has been bought.
    /// Scaling rounds down.
    pub fn after_purchase(&self, price: u32) -> u32 {
        let next = match self.on_buy {
            PriceStep::Add(amount) => price as f64 + amount as f64,
            PriceStep::Scale(factor) => (price as f64 * factor).floor(),
        };
        self.clamp(next)
    }

    /// Price after one tower of this kind has been sold.
    /// Scaling rounds to nearest.
    pub fn after_sale(&self, price: u32) -> u32 {
        let next = match self.on_sell {
            PriceStep::Add(amount) => price as f64 + amount as f64,
            PriceStep::Scale(factor) => (price as f64 * factor).round(),
        };
        self.clamp(next)
    }

    fn clamp(&self, value: f64) -> u32 {
        value.clamp(self.floor as f64, u32::MAX as f64) as u32
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        for step in [self.on_buy, self.on_sell] {
            if let PriceStep::Scale(factor) = step {
                positive(field, factor)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Price of the first tower of this kind.
    pub price: u32,
    pub range: f64,
    pub cooldown_secs: f64,
    #[serde(default)]
    pub windup_secs: f64,
    #[serde(default)]
    pub attack_secs: f64,
    /// Fire as soon as the cooldown expires, skipping wind-up and attack.
    #[serde(default)]
    pub instant_fire: bool,
    pub price_curve: PriceCurve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTable {
    pub archer: TowerStats,
    pub catapult: TowerStats,
    pub mage: TowerStats,
    pub camp: TowerStats,
}

impl TowerTable {
    pub fn get(&self, kind: TowerKind) -> &TowerStats {
        match kind {
            TowerKind::Archer => &self.archer,
            TowerKind::Catapult => &self.catapult,
            TowerKind::Mage => &self.mage,
            TowerKind::Camp => &self.camp,
        }
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        let scaling = PriceCurve {
            on_buy: PriceStep::Scale(1.5),
            on_sell: PriceStep::Scale(0.6666),
            floor: 0,
        };
        Self {
            archer: TowerStats {
                price: ARCHER_PRICE,
                range: ARCHER_RANGE,
                cooldown_secs: ARCHER_COOLDOWN_SECS,
                windup_secs: ARCHER_WINDUP_SECS,
                attack_secs: ARCHER_ATTACK_SECS,
                instant_fire: false,
                price_curve: PriceCurve {
                    on_buy: PriceStep::Add(2),
                    on_sell: PriceStep::Add(-2),
                    floor: 5,
                },
            },
            catapult: TowerStats {
                price: CATAPULT_PRICE,
                range: CATAPULT_RANGE,
                cooldown_secs: CATAPULT_COOLDOWN_SECS,
                windup_secs: CATAPULT_WINDUP_SECS,
                attack_secs: CATAPULT_ATTACK_SECS,
                instant_fire: false,
                price_curve: PriceCurve {
                    on_buy: PriceStep::Add(5),
                    on_sell: PriceStep::Add(-5),
                    floor: 10,
                },
            },
            mage: TowerStats {
                price: MAGE_TOWER_PRICE,
                range: MAGE_TOWER_RANGE,
                cooldown_secs: MAGE_TOWER_COOLDOWN_SECS,
                windup_secs: 0.0,
                attack_secs: 0.0,
                instant_fire: true,
                price_curve: scaling,
            },
            camp: TowerStats {
                price: CAMP_PRICE,
                range: CAMP_RADIUS,
                cooldown_secs: CAMP_COOLDOWN_SECS,
                windup_secs: 0.0,
                attack_secs: 0.0,
                instant_fire: false,
                price_curve: scaling,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileStats {
    pub speed: f64,
    pub damage: u32,
    pub collision_radius: f64,
    #[serde(default)]
    pub max_range: Option<f64>,
    #[serde(default)]
    pub splash_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTable {
    pub arrow: ProjectileStats,
    pub stone: ProjectileStats,
    pub mage_orb: ProjectileStats,
    pub interceptor_bolt: ProjectileStats,
    /// Lifetime of the burst an area impact leaves behind.
    pub explosion_secs: f64,
}

impl ProjectileTable {
    pub fn get(&self, kind: ProjectileKind) -> &ProjectileStats {
        match kind {
            ProjectileKind::Arrow => &self.arrow,
            ProjectileKind::Stone => &self.stone,
            ProjectileKind::MageOrb => &self.mage_orb,
            ProjectileKind::InterceptorBolt => &self.interceptor_bolt,
        }
    }
}

impl Default for ProjectileTable {
    fn default() -> Self {
        Self {
            arrow: ProjectileStats {
                speed: ARROW_SPEED,
                damage: ARROW_DAMAGE,
                collision_radius: ARROW_RADIUS,
                max_range: Some(PROJECTILE_MAX_RANGE),
                splash_radius: None,
            },
            stone: ProjectileStats {
                speed: STONE_SPEED,
                damage: STONE_DAMAGE,
                collision_radius: STONE_RADIUS,
                max_range: Some(PROJECTILE_MAX_RANGE),
                splash_radius: None,
            },
            mage_orb: ProjectileStats {
                speed: ORB_SPEED,
                damage: ORB_DAMAGE,
                collision_radius: ORB_RADIUS,
                max_range: Some(PROJECTILE_MAX_RANGE),
                splash_radius: Some(ORB_SPLASH_RADIUS),
            },
            interceptor_bolt: ProjectileStats {
                speed: BOLT_SPEED,
                damage: 0,
                collision_radius: BOLT_RADIUS,
                max_range: Some(BOLT_MAX_RANGE),
                splash_radius: None,
            },
            explosion_secs: EXPLOSION_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Vision level `n` costs `n * base_price` to upgrade from.
    pub base_price: u32,
    pub vision_max_level: u32,
    pub vision_radius_multipliers: Vec<f64>,
    pub fairy_price: u32,
    pub fairy_duration_secs: f64,
    pub lightning_price: u32,
    pub lightning_damage: u32,
    pub lightning_effect_secs: f64,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            base_price: SPELL_BASE_PRICE,
            vision_max_level: VISION_MAX_LEVEL,
            vision_radius_multipliers: VISION_RADIUS_MULTIPLIERS.to_vec(),
            fairy_price: SPELL_BASE_PRICE,
            fairy_duration_secs: FAIRY_DURATION_SECS,
            lightning_price: SPELL_BASE_PRICE,
            lightning_damage: LIGHTNING_DAMAGE,
            lightning_effect_secs: LIGHTNING_EFFECT_SECS,
        }
    }
}

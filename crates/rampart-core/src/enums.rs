//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Stats come from `GameConfig::enemies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    Wolf,
    Rat,
    Goblin,
    /// Casts interceptor bolts at catapult stones.
    Mage,
    Ogre,
    /// Shielded: blocks arrows.
    Knight,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Wolf,
        EnemyKind::Rat,
        EnemyKind::Goblin,
        EnemyKind::Mage,
        EnemyKind::Ogre,
        EnemyKind::Knight,
    ];

    /// Resolve a wave-file kind id. Case-insensitive; the French ids
    /// `loup`, `gobelin` and `chevalier` are accepted too.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "wolf" | "loup" => Some(Self::Wolf),
            "rat" => Some(Self::Rat),
            "goblin" | "gobelin" => Some(Self::Goblin),
            "mage" => Some(Self::Mage),
            "ogre" => Some(Self::Ogre),
            "knight" | "chevalier" => Some(Self::Knight),
            _ => None,
        }
    }
}

/// Lifecycle phase of an enemy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Created for the wave but waiting for its spawn delay.
    #[default]
    Dormant,
    /// Walking the path.
    Moving,
    /// Health reached zero (or killed by the castle).
    Dead,
    /// Reached the final waypoint.
    Arrived,
}

impl EnemyPhase {
    /// Dead and Arrived enemies never change phase again.
    pub fn is_terminal(self) -> bool {
        matches!(self, EnemyPhase::Dead | EnemyPhase::Arrived)
    }
}

/// Tower archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    Archer,
    Catapult,
    Mage,
    /// Never attacks; lights the enemies within its radius.
    Camp,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Archer,
        TowerKind::Catapult,
        TowerKind::Mage,
        TowerKind::Camp,
    ];

    /// Projectile fired by this tower, `None` for passive towers.
    pub fn projectile(self) -> Option<ProjectileKind> {
        match self {
            TowerKind::Archer => Some(ProjectileKind::Arrow),
            TowerKind::Catapult => Some(ProjectileKind::Stone),
            TowerKind::Mage => Some(ProjectileKind::MageOrb),
            TowerKind::Camp => None,
        }
    }

    /// Target-selection policy, `None` for passive towers.
    pub fn target_policy(self) -> Option<TargetPolicy> {
        match self {
            TowerKind::Archer | TowerKind::Mage => Some(TargetPolicy::ClosestToGoal),
            TowerKind::Catapult => Some(TargetPolicy::HeaviestFirst),
            TowerKind::Camp => None,
        }
    }
}

/// Attack cycle phase of a tower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerPhase {
    #[default]
    Idle,
    /// Wind-up: the target is locked, the shot is not yet released.
    PreAttack,
    Attack,
}

/// How a tower picks among visible enemies in range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPolicy {
    /// Smallest remaining path distance.
    #[default]
    ClosestToGoal,
    /// Highest max health, ties broken by remaining path distance.
    HeaviestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    Arrow,
    Stone,
    /// Splash damage on impact.
    MageOrb,
    /// Fired by enemy mages at catapult stones.
    InterceptorBolt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    Vision,
    Fairy,
    Lightning,
}

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No wave running; the player builds and launches the next wave.
    #[default]
    Building,
    WaveInProgress,
    Victory,
    Defeat,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

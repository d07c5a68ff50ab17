//! Simulation constants and default tuning values.
//!
//! Everything a level designer may want to change is mirrored in
//! `GameConfig`; the values here are its defaults.

// --- Frame ---

/// Nominal frame rate of a host loop (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the nominal frame rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

/// Upper bound on the time scale a player can select.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Numeric floors ---

/// Travel below this distance is treated as no movement.
pub const MOVE_EPSILON: f64 = 1e-6;

/// Floor for segment lengths so zero-length segments never divide by zero.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Floor for heading normalisation of projectiles.
pub const MIN_HEADING_DISTANCE: f64 = 1e-6;

// --- Grid ---

/// Size of one grid cell in pixels.
pub const TILE_SIZE: f64 = 64.0;

pub const GRID_COLUMNS: u32 = 12;
pub const GRID_ROWS: u32 = 12;

/// Path sampling density when deriving the cells a path blocks.
pub const PATH_SAMPLES_PER_TILE: f64 = 4.0;

// --- Economy ---

pub const STARTING_GOLD: u32 = 450;
pub const STARTING_LIVES: u32 = 100;

/// Gold paid when wave `n` resolves is `WAVE_REWARDS[n - 1]`.
pub const WAVE_REWARDS: [u32; 10] = [35, 35, 30, 20, 20, 15, 15, 10, 30, 20];

// --- Visibility ---

/// Radius around the cursor at vision level 1 (pixels).
pub const CURSOR_VISION_RADIUS: f64 = 100.0;

// --- Enemies ---

/// How long a shielded enemy shows its block reaction.
pub const BLOCK_REACTION_SECS: f64 = 0.4;

/// Cooldown between interceptor bolts for an enemy mage.
pub const MAGE_CAST_COOLDOWN_SECS: f64 = 3.0;

// --- Towers ---

pub const ARCHER_PRICE: u32 = 20;
pub const ARCHER_RANGE: f64 = 150.0;
pub const ARCHER_COOLDOWN_SECS: f64 = 0.5;
pub const ARCHER_WINDUP_SECS: f64 = 0.3;
pub const ARCHER_ATTACK_SECS: f64 = 0.2;

pub const CATAPULT_PRICE: u32 = 50;
pub const CATAPULT_RANGE: f64 = 230.0;
pub const CATAPULT_COOLDOWN_SECS: f64 = 2.0;
pub const CATAPULT_WINDUP_SECS: f64 = 0.5;
pub const CATAPULT_ATTACK_SECS: f64 = 0.3;

pub const MAGE_TOWER_PRICE: u32 = 100;
pub const MAGE_TOWER_RANGE: f64 = 190.0;
pub const MAGE_TOWER_COOLDOWN_SECS: f64 = 0.4;

pub const CAMP_PRICE: u32 = 60;
/// Light radius of a camp (pixels).
pub const CAMP_RADIUS: f64 = 100.0;
pub const CAMP_COOLDOWN_SECS: f64 = 1.5;

// --- Projectiles ---

/// Default maximum travel distance of a tower projectile (pixels).
pub const PROJECTILE_MAX_RANGE: f64 = 800.0;

pub const ARROW_DAMAGE: u32 = 20;
pub const ARROW_SPEED: f64 = 720.0;
pub const ARROW_RADIUS: f64 = 12.0;

pub const STONE_DAMAGE: u32 = 170;
pub const STONE_SPEED: f64 = 250.0;
pub const STONE_RADIUS: f64 = 16.0;

pub const ORB_DAMAGE: u32 = 40;
pub const ORB_SPEED: f64 = 400.0;
pub const ORB_RADIUS: f64 = 14.0;
pub const ORB_SPLASH_RADIUS: f64 = 60.0;

pub const BOLT_SPEED: f64 = 700.0;
pub const BOLT_RADIUS: f64 = 24.0;
pub const BOLT_MAX_RANGE: f64 = 400.0;

/// Lifetime of an explosion burst (seconds).
pub const EXPLOSION_SECS: f64 = 0.6;

// --- Spells ---

pub const SPELL_BASE_PRICE: u32 = 30;
pub const VISION_MAX_LEVEL: u32 = 3;
pub const VISION_RADIUS_MULTIPLIERS: [f64; 3] = [1.0, 1.25, 1.5];
pub const FAIRY_DURATION_SECS: f64 = 5.0;
pub const LIGHTNING_DAMAGE: u32 = 10;
pub const LIGHTNING_EFFECT_SECS: f64 = 0.6;

//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are free functions that take `&mut World` (or `&World` for
//! read-only). They do not own state; all state lives in components or on
//! the engine.

pub mod castle;
pub mod cleanup;
pub mod fire_control;
pub mod impact;
pub mod intercept;
pub mod movement;
pub mod projectile_kinematics;
pub mod rewards;
pub mod snapshot;
pub mod spells;
pub mod timers;
pub mod visibility;
pub mod wave_spawner;
pub mod waves;

//! Simulation engine for RAMPART.
//!
//! Owns the hecs ECS world, runs the per-frame systems, and produces
//! GameStateSnapshots for whatever host drives it.

pub mod economy;
pub mod engine;
pub mod guidance;
pub mod placement;
pub mod scenario;
pub mod spellbook;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use rampart_core as core;

//! Tower AI for Rampart.
//!
//! Implements the tower attack state machine and the per-kind target
//! selection policies, independent of the ECS world.

pub mod fsm;
pub mod profiles;
pub mod targeting;

pub use rampart_core as core;

#[cfg(test)]
mod tests;

//! Core types and definitions for the Rampart tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, components, tuning tables, level data, commands, events and
//! state snapshots. It does not run the simulation.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod level;
pub mod state;
pub mod types;

pub use error::ConfigError;

#[cfg(test)]
mod tests;

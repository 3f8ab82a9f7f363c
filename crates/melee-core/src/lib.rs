//! Core types and definitions for the MELEE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! fighter state, intents, attack configuration, bone samples, events,
//! and constants. It has no dependency on any runtime or frontend.

pub mod attacks;
pub mod bones;
pub mod constants;
pub mod enums;
pub mod events;
pub mod intents;
pub mod state;
pub mod types;

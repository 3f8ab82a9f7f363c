//! Simulation engine for MELEE.
//!
//! Owns the authoritative match state, applies per-tick intents through a
//! fixed phase order, and produces ordered `GameEvent`s for the frontend.
//! Completely headless (no rendering dependency), enabling deterministic
//! testing.

pub mod engine;
pub mod host;
pub mod input_buffer;
pub mod machine;
pub mod systems;

pub use engine::{FighterSetup, MatchEngine, MatchSetup};
pub use host::{BoneSource, MatchRunner, PlayerController};
pub use melee_core as core;

#[cfg(test)]
mod tests;

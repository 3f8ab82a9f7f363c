//! Per-tick simulation systems.
//!
//! Systems are free functions over the match state, run by the engine in a
//! fixed numbered order each tick. They own no state of their own.

pub mod attack_progress;
pub mod counters;
pub mod hit_detection;
pub mod intents;
pub mod physics;
pub mod rage_burst;

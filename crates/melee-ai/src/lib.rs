//! Boss AI for MELEE.
//!
//! Implements the profile/phase-driven decision engine that turns per-tick
//! observations into intents, plus the read-only observation projection.

pub mod brain;
pub mod observation;
pub mod profiles;

pub use brain::{AiBrain, AiDecision, AiModifiers};
pub use observation::Observation;

//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Fighter behavior state. Guarded transitions between these are governed
/// by the legal-transition table in the sim crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FighterState {
    #[default]
    Idle,
    /// Walking or running along the ground.
    Move,
    /// Airborne after a jump, until landing.
    Jump,
    /// Active damage-dealing portion of an attack.
    Attack,
    /// Wind-up hold preceding an attack's damage window.
    Telegraph,
    /// Guarding a zone; entered on block press.
    Block,
    /// Hitstun (or pressure stun while `pressure_stun_ticks > 0`).
    Hurt,
    /// Health reached zero. Terminal.
    Dead,
}

/// Horizontal movement request for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    #[default]
    None,
    Right,
}

/// Attack button vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackCommand {
    Light,
    Heavy,
    /// Requires (and consumes) a full special meter.
    Special,
}

/// Guard zone selected while blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockZone {
    Top,
    Center,
}

/// Body zone a hit resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitZone {
    /// Head region; applies the headshot damage multiplier.
    Top,
    /// Chest/torso region.
    Center,
    /// Reserved. Declared for the wire vocabulary but never produced by
    /// block-coverage logic.
    Bottom,
}

impl BlockZone {
    /// Whether this guard covers a given hit zone (top↔top, center↔center).
    pub fn covers(self, zone: HitZone) -> bool {
        matches!(
            (self, zone),
            (BlockZone::Top, HitZone::Top) | (BlockZone::Center, HitZone::Center)
        )
    }
}

/// Attack resolution context: some commands map to different attacks
/// depending on whether the fighter is grounded or airborne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackContext {
    Grounded,
    Airborne,
}

/// Cause recorded on a `Stun` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StunCause {
    /// Pressure meter reached its cap.
    Pressure,
}

/// Match lifecycle phase (host-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Ready,
    Fighting,
    Finished,
}

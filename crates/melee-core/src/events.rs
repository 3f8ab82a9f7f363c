//! Events emitted by the simulation for presentation, audio, and scoring.
//!
//! Events are ordered per tick and delivered at most once; the core never
//! replays or deduplicates them.

use serde::{Deserialize, Serialize};

use crate::enums::{FighterState, HitZone, StunCause};
use crate::types::{AttackId, FighterId};

/// Transient per-tick facts consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An attack connected with a defender.
    Hit {
        attacker: FighterId,
        defender: FighterId,
        attack: AttackId,
        damage: i32,
        zone: HitZone,
    },
    /// An attack landed on a blocking defender.
    Block {
        attacker: FighterId,
        defender: FighterId,
        attack: AttackId,
        damage: i32,
        zone: HitZone,
        /// Correct-zone block; also punishes the attacker with hitstun.
        perfect: bool,
    },
    /// A hit landed inside the defender's parry window.
    Parry {
        attacker: FighterId,
        defender: FighterId,
        attack: AttackId,
    },
    /// A fighter was stunned.
    Stun { fighter: FighterId, cause: StunCause },
    /// Proximity rage burst fired, knocking the opponent back.
    RageBurst { fighter: FighterId },
    /// The AI advanced to a new HP-threshold phase.
    PhaseChange { fighter: FighterId, phase: usize },
    /// An attack completed without landing.
    Whiff { fighter: FighterId, attack: AttackId },
    /// Telegraph wind-up began.
    Telegraph {
        fighter: FighterId,
        attack: AttackId,
        total_ticks: u32,
    },
    /// Attack damage window began.
    AttackStart { fighter: FighterId, attack: AttackId },
    /// A fighter changed behavior state.
    StateChange {
        fighter: FighterId,
        from: FighterState,
        to: FighterState,
    },
    /// A fighter's health reached zero.
    Death { fighter: FighterId },
    Jump { fighter: FighterId },
    Land { fighter: FighterId },
    /// Match began.
    FightStart,
    /// A fighter won the match.
    FightWon { winner: FighterId },
    /// The match ended (double KO or player defeat).
    GameOver,
}

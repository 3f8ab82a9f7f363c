//! Per-character AI behavior profiles and HP-threshold boss phases.
//!
//! Profiles are immutable static configuration supplied once at brain
//! construction. Every range value follows the override chain
//! phase → profile → auto-derived from attack data.

use serde::{Deserialize, Serialize};

use melee_core::constants::*;
use melee_core::enums::{AttackCommand, BlockZone, FighterState, HitZone};
use melee_core::types::{AttackId, LoadoutId};

/// Proximity rage-burst tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RageBurstConfig {
    /// Radius within which the opponent charges the rage timer.
    pub proximity_range: f64,
    /// Ticks of sustained proximity before the burst fires.
    pub trigger_ticks: u32,
    /// Burst knockback magnitude, applied away from the boss.
    pub knockback: f64,
    /// Cooldown before the burst can retrigger (ticks).
    pub cooldown_ticks: u32,
}

impl Default for RageBurstConfig {
    fn default() -> Self {
        Self {
            proximity_range: RAGE_PROXIMITY_RANGE,
            trigger_ticks: RAGE_TRIGGER_TICKS,
            knockback: RAGE_KNOCKBACK,
            cooldown_ticks: RAGE_COOLDOWN_TICKS,
        }
    }
}

/// One weighted entry in an attack pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackChoice {
    pub command: AttackCommand,
    pub weight: f64,
    /// Per-choice cooldown after selection (ticks). Zero means none.
    #[serde(default)]
    pub cooldown_ticks: u32,
    /// Opponent states this choice is never used against.
    #[serde(default)]
    pub forbid_opponent_states: Vec<FighterState>,
}

impl AttackChoice {
    pub fn new(command: AttackCommand, weight: f64) -> Self {
        Self {
            command,
            weight,
            cooldown_ticks: 0,
            forbid_opponent_states: Vec::new(),
        }
    }
}

/// Defense tuning: when and how the AI blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefensePolicy {
    /// Maps an incoming attack's nominal zone to the guard to raise.
    pub zone_map: Vec<(HitZone, BlockZone)>,
    /// Guard used when the zone map has no entry.
    pub default_zone: BlockZone,
}

impl Default for DefensePolicy {
    fn default() -> Self {
        Self {
            zone_map: vec![
                (HitZone::Top, BlockZone::Top),
                (HitZone::Center, BlockZone::Center),
            ],
            default_zone: BlockZone::Center,
        }
    }
}

impl DefensePolicy {
    /// Guard zone for an incoming attack zone.
    pub fn zone_for(&self, incoming: Option<HitZone>) -> BlockZone {
        incoming
            .and_then(|z| {
                self.zone_map
                    .iter()
                    .find(|(hit, _)| *hit == z)
                    .map(|(_, block)| *block)
            })
            .unwrap_or(self.default_zone)
    }
}

/// HP-threshold phase: a bundle of behavior overrides that unlocks once the
/// boss drops to `hp_threshold` percent health.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BossPhase {
    /// Phase activates when current HP% is at or below this value.
    pub hp_threshold: f64,
    pub speed_multiplier: Option<f64>,
    /// Per-tick probability of attempting an attack while engaged.
    pub aggression: Option<f64>,
    pub attack_pool: Option<Vec<AttackChoice>>,
    /// Ticks an opponent attack must be visible before the AI reacts.
    pub reaction_delay_ticks: Option<u32>,
    pub engage_range: Option<f64>,
    pub preferred_distance: Option<f64>,
    pub retreat_distance: Option<f64>,
    pub super_armor: Option<bool>,
    pub rage_burst: Option<RageBurstConfig>,
    /// Per-attack telegraph hold overrides (attack id, freeze ms).
    #[serde(default)]
    pub telegraph_overrides: Vec<(AttackId, u32)>,
    pub loadout: Option<LoadoutId>,
}

/// Complete behavior profile for one AI-controlled character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterAiProfile {
    /// Base weighted attack pool.
    pub attack_pool: Vec<AttackChoice>,
    /// Pool swapped in while the opponent is telegraphing, if any.
    pub telegraph_swap_pool: Option<Vec<AttackChoice>>,
    /// Per-tick probability of attempting an attack while engaged.
    pub aggression: f64,
    /// Ticks an opponent attack must be visible before the AI reacts.
    pub reaction_delay_ticks: u32,
    pub defense: DefensePolicy,
    /// Distance at which the AI engages. `None` derives it from the
    /// character's attack data.
    pub engage_range: Option<f64>,
    /// Extra distance beyond engage range before the AI disengages.
    pub engage_hysteresis: f64,
    pub preferred_distance: Option<f64>,
    pub retreat_distance: Option<f64>,
    /// Probability of retreating when inside retreat distance.
    pub retreat_chance: f64,
    pub rage_burst: Option<RageBurstConfig>,
    /// Ordered HP-threshold phases (highest threshold first by convention;
    /// resolution sorts by threshold regardless).
    pub phases: Vec<BossPhase>,
}

impl Default for CharacterAiProfile {
    fn default() -> Self {
        Self {
            attack_pool: vec![
                AttackChoice::new(AttackCommand::Light, 3.0),
                AttackChoice::new(AttackCommand::Heavy, 1.0),
            ],
            telegraph_swap_pool: None,
            aggression: 0.06,
            reaction_delay_ticks: 6,
            defense: DefensePolicy::default(),
            engage_range: None,
            engage_hysteresis: AI_ENGAGE_HYSTERESIS,
            preferred_distance: None,
            retreat_distance: None,
            retreat_chance: 0.35,
            rage_burst: None,
            phases: Vec::new(),
        }
    }
}

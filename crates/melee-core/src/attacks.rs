//! Attack configuration and the validated attack provider.
//!
//! All per-attack data is immutable static configuration registered once at
//! match assembly. Unregistered lookups are programmer errors and fail fast;
//! the tick step assumes a validated library.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::TICKS_PER_ANIM_FRAME;
use crate::enums::{AttackCommand, AttackContext, HitZone};
use crate::types::{AttackId, CharacterId, LoadoutId};

/// Named skeletal anchor points an attack's hitbox can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoneAnchor {
    RightFist,
    LeftFist,
    RightFoot,
    LeftFoot,
    Elbow,
    Knee,
}

/// Geometry an attack uses to deal damage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HitboxShape {
    /// Circles around one or more bones, tested in declared order.
    Bones { anchors: Vec<BoneAnchor>, radius: f64 },
    /// A capsule along the sampled weapon line.
    WeaponLine { thickness: f64 },
}

/// Damage geometry plus the active window it applies in.
///
/// The window is `[active_from, active_to) × duration_ticks`, measured
/// against the fighter's `state_ticks` so timing stays tick-anchored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitboxSpec {
    pub shape: HitboxShape,
    /// Fraction of `duration_ticks` at which the hitbox activates.
    pub active_from: f64,
    /// Fraction of `duration_ticks` at which the hitbox deactivates.
    pub active_to: f64,
}

/// Telegraph wind-up data, authored against 30fps animation frames.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TelegraphSpec {
    /// Animation frame the pose freezes at.
    pub freeze_at_spine_frame: u32,
    /// How long the freeze holds, in milliseconds.
    pub freeze_duration_ms: u32,
}

/// Static configuration for one attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackConfig {
    pub id: AttackId,
    pub damage: i32,
    /// Nominal target zone, used by the AI's block-zone map.
    pub zone: HitZone,
    /// Base knockback impulse magnitude.
    pub knockback: f64,
    /// Horizontal reach used by range checks (AI and auto-derivation).
    pub range: f64,
    /// Total ticks the attack state lasts.
    pub duration_ticks: u32,
    pub hitbox: HitboxSpec,
    /// Post-attack cooldown (ticks). Zero means none.
    pub cooldown_ticks: u32,
    /// Whether the attack may land repeatedly within one instance.
    pub multi_hit: bool,
    /// Minimum ticks between hits of a multi-hit attack.
    pub hit_interval: u32,
    /// Special meter granted to the attacker on hit (player slot only).
    pub special_charge: f64,
    /// Pressure meter inflicted on the defender on hit (boss slot only).
    pub pressure_charge: f64,
    /// Whether this attack grants super armor while it is active.
    pub super_armor: bool,
    /// Optional wind-up hold before the attack state begins.
    pub telegraph: Option<TelegraphSpec>,
    /// Distance within which the AI considers this attack usable.
    pub engage_range: f64,
}

/// Tick timing for a telegraphed attack, computed once at attack start.
///
/// Keeps the animation-frame coupling explicit: the fixed `F × 2` frame
/// conversion positions the resume point, while the hold duration may be
/// overridden per AI phase without moving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegraphTiming {
    /// Total ticks the telegraph state lasts.
    pub total_ticks: u32,
    /// `state_ticks` value the attack state resumes at, keeping the
    /// active-window fractions aligned with the equivalent animation frame.
    pub resume_tick: u32,
}

impl TelegraphTiming {
    /// Compute timing from a telegraph spec, with an optional per-phase
    /// override of the hold duration (the frame-conversion term is fixed).
    pub fn from_spec(spec: &TelegraphSpec, hold_ms_override: Option<u32>) -> Self {
        let resume_tick = spec.freeze_at_spine_frame * TICKS_PER_ANIM_FRAME;
        let hold_ms = hold_ms_override.unwrap_or(spec.freeze_duration_ms);
        let hold_ticks = (hold_ms as f64 / 1000.0 * crate::constants::TICK_RATE as f64).ceil() as u32;
        Self {
            total_ticks: resume_tick + hold_ticks,
            resume_tick,
        }
    }
}

/// Key for contextual attack resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ResolveKey {
    character: CharacterId,
    loadout: LoadoutId,
    command: AttackCommand,
    context: AttackContext,
}

/// Validated attack provider: per-character attack configs plus the
/// contextual `(character, loadout, command, context) → attack` table.
#[derive(Debug, Clone, Default)]
pub struct AttackLibrary {
    configs: HashMap<(CharacterId, AttackId), AttackConfig>,
    resolve: HashMap<ResolveKey, AttackId>,
}

impl AttackLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attack config. Panics on duplicate registration.
    pub fn register(&mut self, character: CharacterId, config: AttackConfig) {
        let key = (character, config.id);
        if self.configs.insert(key, config).is_some() {
            panic!("duplicate attack registration: character {} attack {}", key.0, key.1);
        }
    }

    /// Map a command in a context to a concrete attack id.
    /// Panics if the target attack was never registered.
    pub fn bind(
        &mut self,
        character: CharacterId,
        loadout: LoadoutId,
        command: AttackCommand,
        context: AttackContext,
        attack: AttackId,
    ) {
        if !self.configs.contains_key(&(character, attack)) {
            panic!("binding to unregistered attack: character {character} attack {attack}");
        }
        self.resolve.insert(
            ResolveKey {
                character,
                loadout,
                command,
                context,
            },
            attack,
        );
    }

    /// Look up a registered attack config. Panics if unregistered — a
    /// defect in match assembly, not a gameplay condition.
    pub fn get(&self, character: CharacterId, attack: AttackId) -> &AttackConfig {
        self.configs.get(&(character, attack)).unwrap_or_else(|| {
            panic!("unregistered attack lookup: character {character} attack {attack}")
        })
    }

    /// Resolve a command to an attack id, if any binding exists for this
    /// context. `None` is an ordinary gameplay condition (no legal attack).
    pub fn resolve(
        &self,
        character: CharacterId,
        loadout: LoadoutId,
        command: AttackCommand,
        context: AttackContext,
    ) -> Option<AttackId> {
        self.resolve
            .get(&ResolveKey {
                character,
                loadout,
                command,
                context,
            })
            .copied()
    }

    /// All attack ids registered for a character, in ascending id order.
    /// Used by the AI to derive range policy from attack data.
    pub fn attacks_for(&self, character: CharacterId) -> Vec<AttackId> {
        let mut ids: Vec<AttackId> = self
            .configs
            .keys()
            .filter(|(c, _)| *c == character)
            .map(|(_, a)| *a)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Zone a hit against an anchor resolves to: head → top, chest → center.
pub fn zone_for_anchor_hit(head: bool) -> HitZone {
    if head {
        HitZone::Top
    } else {
        HitZone::Center
    }
}

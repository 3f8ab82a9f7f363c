//! The boss decision engine.
//!
//! Per tick, the brain turns an `Observation` into an `Intent` plus a
//! mandatory `AiModifiers` bundle derived from the active HP-threshold
//! phase. All randomness comes from a seeded ChaCha8 generator so identical
//! seeds reproduce identical matches.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use melee_core::attacks::AttackLibrary;
use melee_core::constants::*;
use melee_core::enums::{AttackCommand, AttackContext, FighterState, MoveDir};
use melee_core::intents::Intent;
use melee_core::types::{AttackId, CharacterId, LoadoutId};

use crate::observation::Observation;
use crate::profiles::{AttackChoice, CharacterAiProfile, RageBurstConfig};

/// Phase-derived modifiers returned alongside every intent. Always present,
/// with explicit defaults, so hosts never probe for optional behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiModifiers {
    pub speed_multiplier: f64,
    pub super_armor: bool,
    /// Per-attack telegraph hold overrides (attack id, freeze ms).
    pub telegraph_overrides: Vec<(AttackId, u32)>,
    /// Rage burst tuning; `None` disables the mechanic.
    pub rage_burst: Option<RageBurstConfig>,
    /// Loadout the fighter should switch to, if the phase demands one.
    pub loadout: Option<LoadoutId>,
    /// One-shot phase-change notification (phase index), set only on the
    /// tick the phase advances.
    pub phase_changed: Option<usize>,
}

impl Default for AiModifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            super_armor: false,
            telegraph_overrides: Vec::new(),
            rage_burst: None,
            loadout: None,
            phase_changed: None,
        }
    }
}

/// One tick's worth of brain output.
#[derive(Debug, Clone, Serialize)]
pub struct AiDecision {
    pub intent: Intent,
    pub modifiers: AiModifiers,
}

/// Profile/phase-driven decision engine for one AI fighter.
pub struct AiBrain {
    character: CharacterId,
    profile: CharacterAiProfile,
    rng: ChaCha8Rng,
    /// Engage range derived from attack data; the tail of the override
    /// chain phase → profile → derived.
    derived_engage_range: f64,
    engaged: bool,
    /// Tick before which re-engagement is locked after an exit.
    engage_lock_until: u64,
    /// Index of the currently active phase in `profile.phases`.
    active_phase: Option<usize>,
    /// Per-choice cooldowns: command → tick it becomes usable again.
    choice_cooldowns: HashMap<AttackCommand, u64>,
    /// Committed movement direction and the tick the lock expires.
    direction_lock: Option<(MoveDir, u64)>,
}

impl AiBrain {
    /// Build a brain for `character` with the given profile and RNG seed.
    /// The attack library is consulted once to derive the fallback engage
    /// range from the character's move list.
    pub fn new(
        character: CharacterId,
        profile: CharacterAiProfile,
        library: &AttackLibrary,
        seed: u64,
    ) -> Self {
        let derived_engage_range = library
            .attacks_for(character)
            .iter()
            .map(|&id| library.get(character, id).engage_range)
            .fold(0.0_f64, f64::max)
            .max(MIN_FIGHTER_DISTANCE);
        Self {
            character,
            profile,
            rng: ChaCha8Rng::seed_from_u64(seed),
            derived_engage_range,
            engaged: false,
            engage_lock_until: 0,
            active_phase: None,
            choice_cooldowns: HashMap::new(),
            direction_lock: None,
        }
    }

    /// Currently engaged, after hysteresis.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Produce this tick's intent and modifiers.
    pub fn decide(&mut self, obs: &Observation, tick: u64, library: &AttackLibrary) -> AiDecision {
        let phase_changed = self.update_phase(obs.me.health_percent);
        let modifiers = self.build_modifiers(phase_changed);

        if obs.me.state == FighterState::Dead || obs.opponent.state == FighterState::Dead {
            return AiDecision {
                intent: Intent::none(),
                modifiers,
            };
        }

        let loadout = modifiers.loadout.unwrap_or(obs.me.loadout);

        // Defense has first claim on the intent: raising a guard is
        // exclusive in the engine, so nothing else needs to be set.
        if let Some(zone) = self.defensive_block(obs, library) {
            return AiDecision {
                intent: Intent {
                    block: Some(zone),
                    ..Intent::none()
                },
                modifiers,
            };
        }

        self.update_engagement(obs.distance, tick);

        let mut intent = Intent::none();
        if self.engaged {
            intent.attack = self.choose_attack(obs, tick, library, loadout);
        }
        if intent.attack.is_none() {
            intent.move_dir = self.choose_movement(obs, tick);
        }

        AiDecision { intent, modifiers }
    }

    // --- Phase resolution ---

    /// Select the phase with the lowest threshold still at or above the
    /// current HP% (the most advanced phase unlocked at this health).
    /// Returns the new phase index on the tick of a change.
    fn update_phase(&mut self, hp_percent: f64) -> Option<usize> {
        let resolved = self
            .profile
            .phases
            .iter()
            .enumerate()
            .filter(|(_, p)| p.hp_threshold >= hp_percent)
            .min_by(|(_, a), (_, b)| {
                a.hp_threshold
                    .partial_cmp(&b.hp_threshold)
                    .expect("phase thresholds are finite")
            })
            .map(|(i, _)| i);

        if resolved != self.active_phase {
            self.active_phase = resolved;
            resolved
        } else {
            None
        }
    }

    fn build_modifiers(&self, phase_changed: Option<usize>) -> AiModifiers {
        let mut m = AiModifiers {
            rage_burst: self.profile.rage_burst,
            phase_changed,
            ..AiModifiers::default()
        };
        if let Some(phase) = self.active_phase.map(|i| &self.profile.phases[i]) {
            if let Some(speed) = phase.speed_multiplier {
                m.speed_multiplier = speed;
            }
            if let Some(armor) = phase.super_armor {
                m.super_armor = armor;
            }
            if let Some(rage) = phase.rage_burst {
                m.rage_burst = Some(rage);
            }
            m.telegraph_overrides = phase.telegraph_overrides.clone();
            m.loadout = phase.loadout;
        }
        m
    }

    // --- Defense ---

    /// Block when the opponent's active attack can reach us and has been
    /// visible for at least the reaction delay.
    fn defensive_block(
        &self,
        obs: &Observation,
        library: &AttackLibrary,
    ) -> Option<melee_core::enums::BlockZone> {
        if !matches!(
            obs.opponent.state,
            FighterState::Telegraph | FighterState::Attack
        ) {
            return None;
        }
        let attack = obs.opponent.active_attack?;
        if obs.opponent.state_ticks < self.reaction_delay() {
            return None;
        }
        let config = library.get(obs.opponent.character, attack);
        if config.range + AI_BLOCK_RANGE_BUFFER < obs.distance {
            return None;
        }
        Some(self.profile.defense.zone_for(obs.opponent.attack_zone))
    }

    // --- Engagement hysteresis ---

    /// Enter at engage range; exit only beyond engage + hysteresis; after
    /// exiting, re-entry is locked for a fixed tick window.
    fn update_engagement(&mut self, distance: f64, tick: u64) {
        let engage = self.engage_range();
        if self.engaged {
            if distance > engage + self.profile.engage_hysteresis {
                self.engaged = false;
                self.engage_lock_until = tick + AI_ENGAGE_LOCK_TICKS as u64;
            }
        } else if distance <= engage && tick >= self.engage_lock_until {
            self.engaged = true;
        }
    }

    // --- Attack selection ---

    fn choose_attack(
        &mut self,
        obs: &Observation,
        tick: u64,
        library: &AttackLibrary,
        loadout: LoadoutId,
    ) -> Option<AttackCommand> {
        if obs.me.cooldown_ticks > 0 || obs.me.state == FighterState::Hurt {
            return None;
        }
        // Aggression gate: most ticks the AI simply does not act.
        if !self.rng.gen_bool(self.aggression().clamp(0.0, 1.0)) {
            return None;
        }

        let pool = self.current_pool(obs).to_vec();
        let context = if obs.me.airborne {
            AttackContext::Airborne
        } else {
            AttackContext::Grounded
        };

        let usable: Vec<&AttackChoice> = pool
            .iter()
            .filter(|c| self.choice_off_cooldown(c, tick))
            .filter(|c| !c.forbid_opponent_states.contains(&obs.opponent.state))
            .filter(|c| {
                c.command != AttackCommand::Special || obs.me.special_meter >= METER_MAX
            })
            .filter(|c| {
                library
                    .resolve(self.character, loadout, c.command, context)
                    .map(|id| library.get(self.character, id).range >= obs.distance)
                    .unwrap_or(false)
            })
            .collect();

        let picked = if usable.is_empty() {
            // Fall back to anything off cooldown that resolves at all.
            let fallback: Vec<&AttackChoice> = pool
                .iter()
                .filter(|c| self.choice_off_cooldown(c, tick))
                .filter(|c| {
                    c.command != AttackCommand::Special || obs.me.special_meter >= METER_MAX
                })
                .filter(|c| {
                    library
                        .resolve(self.character, loadout, c.command, context)
                        .is_some()
                })
                .collect();
            self.weighted_pick(&fallback)
        } else {
            self.weighted_pick(&usable)
        }?;

        if picked.cooldown_ticks > 0 {
            self.choice_cooldowns
                .insert(picked.command, tick + picked.cooldown_ticks as u64);
        }
        Some(picked.command)
    }

    fn current_pool(&self, obs: &Observation) -> &[AttackChoice] {
        if obs.opponent.state == FighterState::Telegraph {
            if let Some(swap) = &self.profile.telegraph_swap_pool {
                return swap;
            }
        }
        if let Some(phase) = self.active_phase.map(|i| &self.profile.phases[i]) {
            if let Some(pool) = &phase.attack_pool {
                return pool;
            }
        }
        &self.profile.attack_pool
    }

    fn choice_off_cooldown(&self, choice: &AttackChoice, tick: u64) -> bool {
        self.choice_cooldowns
            .get(&choice.command)
            .map(|&until| tick >= until)
            .unwrap_or(true)
    }

    fn weighted_pick<'a>(&mut self, pool: &[&'a AttackChoice]) -> Option<&'a AttackChoice> {
        let total: f64 = pool.iter().map(|c| c.weight.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.rng.gen_range(0.0..total);
        for choice in pool {
            roll -= choice.weight.max(0.0);
            if roll < 0.0 {
                return Some(choice);
            }
        }
        pool.last().copied()
    }

    // --- Movement: retreat > maintain-distance > chase ---

    fn choose_movement(&mut self, obs: &Observation, tick: u64) -> MoveDir {
        if let Some((dir, until)) = self.direction_lock {
            if tick < until {
                return dir;
            }
            self.direction_lock = None;
        }

        let away = if obs.opponent.x < obs.me.x {
            MoveDir::Right
        } else {
            MoveDir::Left
        };
        let toward = if obs.opponent.x < obs.me.x {
            MoveDir::Left
        } else {
            MoveDir::Right
        };

        // Retreat fires probabilistically once the opponent crowds in.
        if obs.distance < self.retreat_distance()
            && self.rng.gen_bool(self.profile.retreat_chance.clamp(0.0, 1.0))
        {
            self.direction_lock = Some((away, tick + AI_DIRECTION_LOCK_TICKS as u64));
            return away;
        }

        // Maintain a deadzone band around the preferred distance.
        let preferred = self.preferred_distance();
        if obs.distance < preferred - AI_MAINTAIN_DEADZONE {
            return away;
        }
        if obs.distance > preferred + AI_MAINTAIN_DEADZONE {
            self.direction_lock = Some((toward, tick + AI_DIRECTION_LOCK_TICKS as u64));
            return toward;
        }
        MoveDir::None
    }

    // --- Override chains: phase → profile → derived ---

    fn active(&self) -> Option<&crate::profiles::BossPhase> {
        self.active_phase.map(|i| &self.profile.phases[i])
    }

    fn engage_range(&self) -> f64 {
        self.active()
            .and_then(|p| p.engage_range)
            .or(self.profile.engage_range)
            .unwrap_or(self.derived_engage_range)
    }

    fn preferred_distance(&self) -> f64 {
        self.active()
            .and_then(|p| p.preferred_distance)
            .or(self.profile.preferred_distance)
            .unwrap_or(self.engage_range() * AI_PREFERRED_DISTANCE_FRAC)
    }

    fn retreat_distance(&self) -> f64 {
        self.active()
            .and_then(|p| p.retreat_distance)
            .or(self.profile.retreat_distance)
            .unwrap_or(self.preferred_distance() * AI_RETREAT_DISTANCE_FRAC)
    }

    fn aggression(&self) -> f64 {
        self.active()
            .and_then(|p| p.aggression)
            .unwrap_or(self.profile.aggression)
    }

    fn reaction_delay(&self) -> u32 {
        self.active()
            .and_then(|p| p.reaction_delay_ticks)
            .unwrap_or(self.profile.reaction_delay_ticks)
    }
}

//! Match engine — the core of the simulation.
//!
//! `MatchEngine` owns the authoritative `MatchState`, applies both intents
//! through a fixed phase order each tick, and produces ordered `GameEvent`s.
//! Each tick operates on a fresh copy of the previous state, so a tick is a
//! pure function of (state, intents, bone samples) and only the engine
//! writes between ticks. Completely headless, enabling deterministic
//! testing.

use std::collections::HashMap;

use melee_ai::AiModifiers;
use melee_core::attacks::AttackLibrary;
use melee_core::bones::BoneSamples;
use melee_core::events::GameEvent;
use melee_core::intents::Intent;
use melee_core::state::{Fighter, MatchState};
use melee_core::types::{AttackId, CharacterId, FighterId, LoadoutId};

use crate::input_buffer::InputBuffer;
use crate::systems;

/// Spawn parameters for one fighter slot.
#[derive(Debug, Clone, Copy)]
pub struct FighterSetup {
    pub character: CharacterId,
    pub loadout: LoadoutId,
    pub x: f64,
    pub max_health: i32,
}

/// Everything needed to assemble a match.
pub struct MatchSetup {
    /// Validated attack configs for both characters.
    pub library: AttackLibrary,
    /// Slot 0 is the player, slot 1 the AI.
    pub fighters: [FighterSetup; 2],
}

/// Per-fighter modifier slot, written post-step from the AI's decision.
/// Kept out of `Fighter` so the state stays flat and `Copy`.
#[derive(Debug, Clone, Default)]
struct ModifierSlot {
    telegraph_overrides: HashMap<AttackId, u32>,
    rage_burst: Option<melee_ai::profiles::RageBurstConfig>,
}

/// The simulation engine. Owns the match state and all per-match scratch.
pub struct MatchEngine {
    setup: MatchSetup,
    state: MatchState,
    buffers: [InputBuffer; 2],
    modifiers: [ModifierSlot; 2],
}

impl MatchEngine {
    /// Assemble a new match with both fighters at their spawn positions.
    pub fn new(setup: MatchSetup) -> Self {
        let state = MatchState::new(spawn_fighters(&setup));
        Self {
            setup,
            state,
            buffers: [InputBuffer::default(), InputBuffer::default()],
            modifiers: [ModifierSlot::default(), ModifierSlot::default()],
        }
    }

    /// Current authoritative state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The match's attack library.
    pub fn library(&self) -> &AttackLibrary {
        &self.setup.library
    }

    /// Direct state access for test setup.
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Restore the initial match state for a rematch. Static configuration
    /// survives; buffers and modifier slots do not.
    pub fn reset(&mut self) {
        self.state = MatchState::new(spawn_fighters(&self.setup));
        for buffer in &mut self.buffers {
            buffer.clear();
        }
        self.modifiers = [ModifierSlot::default(), ModifierSlot::default()];
    }

    /// Advance the match by one tick and return the events it produced.
    ///
    /// `collision_enabled` gates pairwise separation and facing for the
    /// tick; scripted sequences turn it off.
    pub fn step(
        &mut self,
        intents: [Intent; 2],
        bones: &[BoneSamples; 2],
        collision_enabled: bool,
    ) -> Vec<GameEvent> {
        let mut next = self.state;
        let tick = next.time.tick;
        let mut events = Vec::new();

        // Quantize geometry on entry so identical poses hit identically.
        let bones = [bones[0].clone().quantized(), bones[1].clone().quantized()];

        // 1. Intents (block > jump > attack > movement, per fighter)
        for (i, fighter) in next.fighters.iter_mut().enumerate() {
            systems::intents::apply(
                fighter,
                &intents[i],
                &mut self.buffers[i],
                &self.setup.library,
                &self.modifiers[i].telegraph_overrides,
                tick,
                &mut events,
            );
        }
        // 2. Attack progression (telegraph holds, resumes, completions)
        systems::attack_progress::run(
            &mut next.fighters,
            &self.setup.library,
            [
                &self.modifiers[0].telegraph_overrides,
                &self.modifiers[1].telegraph_overrides,
            ],
            &mut events,
        );
        // 3. Vertical physics (gravity, landing)
        systems::physics::run_vertical(&mut next, &mut events);
        // 4. Horizontal physics (both channels, damping, arena clamp)
        systems::physics::run_horizontal(&mut next);
        // 5. Pairwise separation and facing
        if collision_enabled {
            systems::physics::separate_and_face(&mut next);
        }
        // 6. Hit detection, both directions
        {
            let (player, boss) = next.fighters_mut();
            systems::hit_detection::resolve(
                player,
                boss,
                &bones[0],
                &bones[1],
                &self.setup.library,
                tick,
                &mut events,
            );
            systems::hit_detection::resolve(
                boss,
                player,
                &bones[1],
                &bones[0],
                &self.setup.library,
                tick,
                &mut events,
            );
        }
        // 7. Timers and hitstun recovery
        systems::counters::run(&mut next, tick);
        systems::counters::recover_from_hurt(&mut next, &mut events);

        next.time.advance();
        self.state = next;
        events
    }

    /// Install a fighter's AI modifiers and run its post-step mechanics.
    /// Called by the host after `step`, in slot order.
    pub fn apply_ai_decision(
        &mut self,
        fighter: FighterId,
        modifiers: &AiModifiers,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        {
            let f = &mut self.state.fighters[fighter];
            f.speed_multiplier = modifiers.speed_multiplier;
            f.super_armor_active = modifiers.super_armor;
            if let Some(loadout) = modifiers.loadout {
                f.loadout = loadout;
            }
        }
        self.modifiers[fighter].telegraph_overrides =
            modifiers.telegraph_overrides.iter().copied().collect();
        self.modifiers[fighter].rage_burst = modifiers.rage_burst;

        if let Some(phase) = modifiers.phase_changed {
            events.push(GameEvent::PhaseChange { fighter, phase });
        }

        if let Some(config) = self.modifiers[fighter].rage_burst {
            let tick = self.state.time.tick;
            let (player, boss) = self.state.fighters_mut();
            let (owner, opponent) = if fighter == 0 {
                (player, boss)
            } else {
                (boss, player)
            };
            systems::rage_burst::run(owner, opponent, &config, tick, &mut events);
        }

        events
    }
}

fn spawn_fighters(setup: &MatchSetup) -> [Fighter; 2] {
    [0usize, 1].map(|id| {
        let f = setup.fighters[id];
        Fighter::spawn(id, f.character, f.loadout, f.x, f.max_health)
    })
}

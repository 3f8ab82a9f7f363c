//! Attack lifecycle: start, telegraph hold, resume, completion.
//!
//! Telegraph timing is authored in 30fps animation frames; the freeze frame
//! converts to ticks at a fixed F × 2 and the hold duration converts from
//! milliseconds, rounding partial ticks up. When the hold ends the fighter
//! enters the attack state with `state_ticks` seeded to the resume tick so
//! the active window stays aligned with the animation it was authored
//! against.

use std::collections::HashMap;

use melee_core::attacks::{AttackConfig, AttackLibrary, TelegraphTiming};
use melee_core::enums::FighterState;
use melee_core::events::GameEvent;
use melee_core::state::Fighter;
use melee_core::types::AttackId;

use crate::machine;

/// Begin an attack: allocate a fresh instance and enter telegraph (if the
/// attack winds up) or the attack state directly.
pub fn start_attack(
    fighter: &mut Fighter,
    config: &AttackConfig,
    telegraph_overrides: &HashMap<AttackId, u32>,
    events: &mut Vec<GameEvent>,
) {
    fighter.attack_instance_id += 1;
    fighter.attack_landed_hit = false;
    fighter.active_attack = Some(config.id);
    fighter.attack_zone = Some(config.zone);
    fighter.move_vx = 0.0;

    let timing = config
        .telegraph
        .as_ref()
        .map(|spec| TelegraphTiming::from_spec(spec, telegraph_overrides.get(&config.id).copied()));

    match timing {
        Some(timing) if timing.total_ticks > 0 => {
            machine::force_transition(fighter, FighterState::Telegraph, events);
            events.push(GameEvent::Telegraph {
                fighter: fighter.id,
                attack: config.id,
                total_ticks: timing.total_ticks,
            });
        }
        _ => {
            machine::force_transition(fighter, FighterState::Attack, events);
            events.push(GameEvent::AttackStart {
                fighter: fighter.id,
                attack: config.id,
            });
        }
    }
}

/// Advance telegraph holds and attack durations for both fighters.
pub fn run(
    fighters: &mut [Fighter; 2],
    library: &AttackLibrary,
    telegraph_overrides: [&HashMap<AttackId, u32>; 2],
    events: &mut Vec<GameEvent>,
) {
    for fighter in fighters.iter_mut() {
        let Some(attack) = fighter.active_attack else {
            continue;
        };
        let config = library.get(fighter.character, attack);
        match fighter.state {
            FighterState::Telegraph => {
                let timing = match &config.telegraph {
                    Some(spec) => TelegraphTiming::from_spec(
                        spec,
                        telegraph_overrides[fighter.id].get(&attack).copied(),
                    ),
                    // Telegraph state without telegraph data: recover by
                    // entering the attack immediately.
                    None => TelegraphTiming {
                        total_ticks: 0,
                        resume_tick: 0,
                    },
                };
                if fighter.state_ticks >= timing.total_ticks {
                    machine::force_transition(fighter, FighterState::Attack, events);
                    fighter.state_ticks = timing.resume_tick;
                    events.push(GameEvent::AttackStart {
                        fighter: fighter.id,
                        attack,
                    });
                }
            }
            FighterState::Attack => {
                if fighter.state_ticks >= config.duration_ticks {
                    if !fighter.attack_landed_hit {
                        events.push(GameEvent::Whiff {
                            fighter: fighter.id,
                            attack,
                        });
                    }
                    fighter.active_attack = None;
                    fighter.attack_zone = None;
                    fighter.cooldown_ticks = config.cooldown_ticks;
                    machine::force_transition(fighter, FighterState::Idle, events);
                }
            }
            _ => {}
        }
    }
}

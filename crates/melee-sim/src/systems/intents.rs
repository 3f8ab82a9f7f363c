//! Intent application: block > jump > attack > movement.
//!
//! Each fighter's intent is applied once per tick with a strict priority.
//! Raising a guard is exclusive (a successful block press consumes the whole
//! intent), as is performing a jump. A pressure-stunned fighter is fully
//! paralyzed and its intent is discarded.

use std::collections::HashMap;

use melee_core::attacks::AttackLibrary;
use melee_core::constants::{BASE_MOVE_SPEED, METER_MAX, RUN_MULTIPLIER};
use melee_core::enums::{AttackCommand, AttackContext, FighterState, MoveDir};
use melee_core::events::GameEvent;
use melee_core::intents::Intent;
use melee_core::state::Fighter;
use melee_core::types::AttackId;

use crate::input_buffer::InputBuffer;
use crate::machine;

pub fn apply(
    fighter: &mut Fighter,
    intent: &Intent,
    buffer: &mut InputBuffer,
    library: &AttackLibrary,
    telegraph_overrides: &HashMap<AttackId, u32>,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    if fighter.is_dead() || fighter.pressure_stun_ticks > 0 {
        return;
    }

    // 1. Block. A press cancels any active attack and zeroes input motion;
    //    the parry window opens only on the initial press.
    match intent.block {
        Some(zone) => {
            let initial = fighter.block_zone.is_none();
            if machine::try_transition(fighter, FighterState::Block, events)
                || fighter.state == FighterState::Block
            {
                fighter.active_attack = None;
                fighter.attack_zone = None;
                fighter.move_vx = 0.0;
                fighter.block_zone = Some(zone);
                if initial {
                    fighter.parry_window_active = true;
                    fighter.last_block_press_tick = tick;
                }
                return;
            }
        }
        None => {
            if fighter.state == FighterState::Block {
                fighter.block_zone = None;
                machine::try_transition(fighter, FighterState::Idle, events);
            }
        }
    }

    // 2. Jump, grounded only.
    if intent.jump
        && !fighter.is_airborne()
        && matches!(fighter.state, FighterState::Idle | FighterState::Move)
        && machine::try_transition(fighter, FighterState::Jump, events)
    {
        fighter.vy = melee_core::constants::JUMP_VELOCITY;
        fighter.move_vx = 0.0;
        events.push(GameEvent::Jump {
            fighter: fighter.id,
        });
        return;
    }

    // 3. Attack: an explicit press first, otherwise a buffered one.
    let can_start = fighter.is_actionable() && fighter.cooldown_ticks == 0;
    let command = match intent.attack {
        Some(command) => {
            if can_start {
                Some(command)
            } else {
                // Too early; replay it once the fighter frees up.
                buffer.push(command, tick);
                None
            }
        }
        None if can_start => buffer.take_fresh(tick),
        None => None,
    };
    if let Some(command) = command {
        if try_start_attack(fighter, command, library, telegraph_overrides, events) {
            return;
        }
    }

    // 4. Movement (and air drift while jumping).
    apply_movement(fighter, intent, events);
}

/// Resolve a command in the fighter's current context and start the attack.
/// Returns false when no binding exists or the meter gate fails.
fn try_start_attack(
    fighter: &mut Fighter,
    command: AttackCommand,
    library: &AttackLibrary,
    telegraph_overrides: &HashMap<AttackId, u32>,
    events: &mut Vec<GameEvent>,
) -> bool {
    if command == AttackCommand::Special {
        if fighter.special_meter < METER_MAX {
            return false;
        }
    }
    let context = if fighter.is_airborne() {
        AttackContext::Airborne
    } else {
        AttackContext::Grounded
    };
    let Some(attack) = library.resolve(fighter.character, fighter.loadout, command, context) else {
        return false;
    };
    if command == AttackCommand::Special {
        fighter.special_meter = 0.0;
    }
    let config = library.get(fighter.character, attack).clone();
    super::attack_progress::start_attack(fighter, &config, telegraph_overrides, events);
    true
}

fn apply_movement(fighter: &mut Fighter, intent: &Intent, events: &mut Vec<GameEvent>) {
    let movable = matches!(
        fighter.state,
        FighterState::Idle | FighterState::Move | FighterState::Jump
    );
    if !movable {
        return;
    }
    match intent.move_dir {
        MoveDir::Left | MoveDir::Right => {
            let sign = if intent.move_dir == MoveDir::Left {
                -1.0
            } else {
                1.0
            };
            let run = if intent.run { RUN_MULTIPLIER } else { 1.0 };
            fighter.move_vx = sign * BASE_MOVE_SPEED * run * fighter.speed_multiplier;
            if fighter.state == FighterState::Idle {
                machine::try_transition(fighter, FighterState::Move, events);
            }
        }
        MoveDir::None => {
            fighter.move_vx = 0.0;
            if fighter.state == FighterState::Move {
                machine::try_transition(fighter, FighterState::Idle, events);
            }
        }
    }
}

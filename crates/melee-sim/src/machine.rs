//! Fighter state machine.
//!
//! Guarded transitions go through `try_transition`, which consults the
//! legal-transition table and is a silent no-op when refused. Forced
//! transitions bypass the table and exist only for the hurt, death, and
//! attack-start paths. Both reset the state tick counter and emit a
//! `StateChange` event.

use melee_core::enums::FighterState;
use melee_core::events::GameEvent;
use melee_core::state::Fighter;

/// Whether `from → to` is a legal guarded transition.
pub fn is_legal(from: FighterState, to: FighterState) -> bool {
    use FighterState::*;
    if from == to || from == Dead {
        return false;
    }
    match (from, to) {
        // A guard can be raised from any non-dead state.
        (_, Block) => true,
        (Idle, Move | Jump | Telegraph | Attack) => true,
        (Move, Idle | Jump | Telegraph | Attack) => true,
        (Jump, Idle | Telegraph | Attack) => true,
        (Block, Idle) => true,
        (Hurt, Idle) => true,
        _ => false,
    }
}

/// Attempt a guarded transition. Refused transitions leave the fighter
/// untouched and return false.
pub fn try_transition(
    fighter: &mut Fighter,
    to: FighterState,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !is_legal(fighter.state, to) {
        return false;
    }
    enter(fighter, to, events);
    true
}

/// Transition unconditionally. Only the hurt, death, and attack-start code
/// paths may call this.
pub fn force_transition(fighter: &mut Fighter, to: FighterState, events: &mut Vec<GameEvent>) {
    if fighter.state == to {
        return;
    }
    enter(fighter, to, events);
}

fn enter(fighter: &mut Fighter, to: FighterState, events: &mut Vec<GameEvent>) {
    events.push(GameEvent::StateChange {
        fighter: fighter.id,
        from: fighter.state,
        to,
    });
    fighter.state = to;
    fighter.state_ticks = 0;
    if to != FighterState::Block {
        fighter.block_zone = None;
    }
}

//! Timer upkeep: state ticks, cooldowns, stun countdown, parry expiry,
//! and hitstun recovery.

use melee_core::constants::{HURT_TICKS, PARRY_WINDOW_TICKS};
use melee_core::enums::FighterState;
use melee_core::events::GameEvent;
use melee_core::state::MatchState;

use crate::machine;

/// Advance every per-fighter timer by one tick.
pub fn run(state: &mut MatchState, tick: u64) {
    for fighter in state.fighters.iter_mut() {
        if fighter.is_dead() {
            continue;
        }
        fighter.state_ticks += 1;
        if fighter.cooldown_ticks > 0 {
            fighter.cooldown_ticks -= 1;
        }
        if fighter.pressure_stun_ticks > 0 {
            fighter.pressure_stun_ticks -= 1;
            if fighter.pressure_stun_ticks == 0 {
                fighter.pressure_meter = 0.0;
            }
        }
        if fighter.parry_window_active
            && tick.saturating_sub(fighter.last_block_press_tick) >= PARRY_WINDOW_TICKS as u64
        {
            fighter.parry_window_active = false;
        }
    }
}

/// Return fighters from hitstun once it has run its course. A pressure
/// stun holds the fighter in hurt until its own countdown finishes.
pub fn recover_from_hurt(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    for fighter in state.fighters.iter_mut() {
        if fighter.state == FighterState::Hurt
            && fighter.pressure_stun_ticks == 0
            && fighter.state_ticks >= HURT_TICKS
        {
            machine::try_transition(fighter, FighterState::Idle, events);
        }
    }
}

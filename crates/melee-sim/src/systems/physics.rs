//! Kinematics: gravity, landing, the two horizontal velocity channels,
//! arena clamping, pairwise separation, and facing.
//!
//! Horizontal motion keeps input velocity and knockback impulse in separate
//! channels so input stays instant while impulses decay geometrically.
//! Separation and facing only run when pairwise collision is enabled for
//! the tick (scripted sequences turn it off).

use melee_core::constants::{
    ARENA_MAX_X, ARENA_MIN_X, DT, FACING_DEADZONE, GRAVITY, GROUND_Y, IMPULSE_DAMPING,
    IMPULSE_EPSILON, MIN_FIGHTER_DISTANCE,
};
use melee_core::enums::FighterState;
use melee_core::events::GameEvent;
use melee_core::state::{Fighter, MatchState};

use crate::machine;

/// Vertical integration: gravity while airborne or rising, landing back to
/// idle, ground clamp.
pub fn run_vertical(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    for fighter in state.fighters.iter_mut() {
        if fighter.is_dead() {
            continue;
        }
        if fighter.is_airborne() || fighter.vy < 0.0 {
            fighter.vy += GRAVITY * DT;
        }
        fighter.y += fighter.vy * DT;

        if fighter.y >= GROUND_Y && fighter.vy > 0.0 {
            fighter.y = GROUND_Y;
            fighter.vy = 0.0;
            if fighter.state == FighterState::Jump {
                machine::try_transition(fighter, FighterState::Idle, events);
                events.push(GameEvent::Land {
                    fighter: fighter.id,
                });
            }
        }
    }
}

/// Horizontal integration: sum both channels, damp the impulse, clamp to
/// the arena. At a wall, outward velocity and outward impulse are zeroed.
pub fn run_horizontal(state: &mut MatchState) {
    for fighter in state.fighters.iter_mut() {
        if fighter.is_dead() {
            continue;
        }
        fighter.x += (fighter.move_vx + fighter.impulse_vx) * DT;

        fighter.impulse_vx *= IMPULSE_DAMPING;
        if fighter.impulse_vx.abs() < IMPULSE_EPSILON {
            fighter.impulse_vx = 0.0;
        }

        if fighter.x <= ARENA_MIN_X {
            fighter.x = ARENA_MIN_X;
            fighter.move_vx = fighter.move_vx.max(0.0);
            fighter.impulse_vx = fighter.impulse_vx.max(0.0);
        } else if fighter.x >= ARENA_MAX_X {
            fighter.x = ARENA_MAX_X;
            fighter.move_vx = fighter.move_vx.min(0.0);
            fighter.impulse_vx = fighter.impulse_vx.min(0.0);
        }
    }
}

/// Keep grounded fighters a minimum distance apart and update facing.
pub fn separate_and_face(state: &mut MatchState) {
    let (a, b) = state.fighters_mut();

    if !a.is_airborne() && !b.is_airborne() && !a.is_dead() && !b.is_dead() {
        let gap = (a.x - b.x).abs();
        if gap < MIN_FIGHTER_DISTANCE {
            let push = (MIN_FIGHTER_DISTANCE - gap) / 2.0;
            // Exactly stacked fighters split by slot: 0 left, 1 right.
            let (left, right) = if a.x < b.x || (a.x == b.x && a.id == 0) {
                (a.x - push, b.x + push)
            } else {
                (a.x + push, b.x - push)
            };
            a.x = left.clamp(ARENA_MIN_X, ARENA_MAX_X);
            b.x = right.clamp(ARENA_MIN_X, ARENA_MAX_X);
        }
    }

    update_facing(a, b.x);
    update_facing(b, a.x);
}

/// Face the opponent, with a deadzone so an overlapping pair does not
/// flicker. Locked during attacks, telegraphs, hitstun, and while airborne.
fn update_facing(fighter: &mut Fighter, opponent_x: f64) {
    if fighter.is_airborne()
        || matches!(
            fighter.state,
            FighterState::Attack
                | FighterState::Telegraph
                | FighterState::Hurt
                | FighterState::Dead
        )
    {
        return;
    }
    if opponent_x > fighter.x + FACING_DEADZONE {
        fighter.facing = melee_core::types::Direction::Right;
    } else if opponent_x < fighter.x - FACING_DEADZONE {
        fighter.facing = melee_core::types::Direction::Left;
    }
}

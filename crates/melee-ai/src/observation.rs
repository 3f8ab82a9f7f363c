//! Read-only projection of match state for the AI brain.

use melee_core::enums::{FighterState, HitZone};
use melee_core::state::MatchState;
use melee_core::types::{AttackId, CharacterId, Direction, FighterId, LoadoutId};

/// What the brain can see of one fighter.
#[derive(Debug, Clone, Copy)]
pub struct FighterView {
    pub character: CharacterId,
    pub state: FighterState,
    pub state_ticks: u32,
    pub x: f64,
    pub airborne: bool,
    pub facing: Direction,
    pub health_percent: f64,
    pub loadout: LoadoutId,
    pub cooldown_ticks: u32,
    pub active_attack: Option<AttackId>,
    pub attack_zone: Option<HitZone>,
    pub special_meter: f64,
}

/// One fighter's view of the match: self, opponent, and the distance
/// between them.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub me: FighterView,
    pub opponent: FighterView,
    pub distance: f64,
}

fn view(state: &MatchState, id: FighterId) -> FighterView {
    let f = &state.fighters[id];
    FighterView {
        character: f.character,
        state: f.state,
        state_ticks: f.state_ticks,
        x: f.x,
        airborne: f.is_airborne(),
        facing: f.facing,
        health_percent: f.health_percent(),
        loadout: f.loadout,
        cooldown_ticks: f.cooldown_ticks,
        active_attack: f.active_attack,
        attack_zone: f.attack_zone,
        special_meter: f.special_meter,
    }
}

impl Observation {
    /// Project the match state from the perspective of fighter `id`.
    pub fn capture(state: &MatchState, id: FighterId) -> Self {
        Self {
            me: view(state, id),
            opponent: view(state, 1 - id),
            distance: state.distance(),
        }
    }
}

//! Authoritative match state.
//!
//! `MatchState` holds the tick counter and exactly two fighters in fixed
//! slots (0 = player, 1 = AI). The tick step produces a fresh copy each
//! tick from the previous one plus intents; `Fighter` is `Copy` with only
//! flat fields so the per-tick shallow copy is sound by construction.

use serde::{Deserialize, Serialize};

use crate::enums::{BlockZone, FighterState, HitZone};
use crate::types::{AttackId, CharacterId, Direction, FighterId, LoadoutId, SimTime};

/// One fighter's complete simulation state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub character: CharacterId,
    pub loadout: LoadoutId,
    pub state: FighterState,

    // --- Kinematics ---
    pub x: f64,
    /// Vertical position; 0 is the ground, negative is airborne.
    pub y: f64,
    pub vy: f64,
    /// Input-driven horizontal velocity (instant response).
    pub move_vx: f64,
    /// Damped knockback momentum, kept separate so input stays snappy.
    pub impulse_vx: f64,
    pub facing: Direction,

    // --- Health & meters ---
    pub health: i32,
    pub max_health: i32,
    pub special_meter: f64,
    pub pressure_meter: f64,
    /// Remaining full-paralysis ticks from a pressure stun.
    pub pressure_stun_ticks: u32,

    // --- Timers ---
    /// Ticks spent in the current state.
    pub state_ticks: u32,
    /// Remaining post-attack cooldown.
    pub cooldown_ticks: u32,

    // --- Attack bookkeeping ---
    pub active_attack: Option<AttackId>,
    /// Nominal zone of the active attack, cached for the AI's defense read.
    pub attack_zone: Option<HitZone>,
    /// Instance id of the active attack; increments per attack start.
    /// 0 means no instance has started yet.
    pub attack_instance_id: u32,
    /// Instance id of the last attack that hit this fighter.
    pub last_hit_by_instance: u32,
    /// Tick this fighter was last hit (multi-hit interval gating).
    pub last_hit_tick: u64,
    /// True once the active attack instance has landed (or been parried).
    pub attack_landed_hit: bool,

    // --- Blocking ---
    pub block_zone: Option<BlockZone>,
    pub last_block_press_tick: u64,
    pub parry_window_active: bool,

    // --- Rage burst ---
    /// Consecutive ticks the opponent has stayed inside proximity range.
    pub proximity_ticks: u32,
    /// Tick until which the rage burst stays on cooldown.
    pub rage_cooldown_until: u64,

    // --- Phase modifiers (written post-step from AI output) ---
    pub speed_multiplier: f64,
    /// Phase-wide super armor flag; attack-specific armor lives in config.
    pub super_armor_active: bool,
}

impl Fighter {
    /// Spawn a fighter in its slot at the given x with full health.
    pub fn spawn(
        id: FighterId,
        character: CharacterId,
        loadout: LoadoutId,
        x: f64,
        max_health: i32,
    ) -> Self {
        Self {
            id,
            character,
            loadout,
            state: FighterState::Idle,
            x,
            y: crate::constants::GROUND_Y,
            vy: 0.0,
            move_vx: 0.0,
            impulse_vx: 0.0,
            facing: if id == 0 { Direction::Right } else { Direction::Left },
            health: max_health,
            max_health,
            special_meter: 0.0,
            pressure_meter: 0.0,
            pressure_stun_ticks: 0,
            state_ticks: 0,
            cooldown_ticks: 0,
            active_attack: None,
            attack_zone: None,
            attack_instance_id: 0,
            last_hit_by_instance: 0,
            last_hit_tick: 0,
            attack_landed_hit: false,
            block_zone: None,
            last_block_press_tick: 0,
            parry_window_active: false,
            proximity_ticks: 0,
            rage_cooldown_until: 0,
            speed_multiplier: 1.0,
            super_armor_active: false,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.y < crate::constants::GROUND_Y
    }

    /// Whether new attacks may start from the current state.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self.state,
            FighterState::Idle | FighterState::Move | FighterState::Jump
        )
    }

    pub fn is_dead(&self) -> bool {
        self.state == FighterState::Dead
    }

    /// Health as a percentage of maximum (0-100).
    pub fn health_percent(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64 * 100.0
    }

    /// Direction toward a world x coordinate.
    pub fn direction_to(&self, x: f64) -> Direction {
        if x < self.x {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Tick counter plus the two fighter slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub time: SimTime,
    pub fighters: [Fighter; 2],
}

impl MatchState {
    pub fn new(fighters: [Fighter; 2]) -> Self {
        Self {
            time: SimTime::default(),
            fighters,
        }
    }

    /// Horizontal distance between the two fighters.
    pub fn distance(&self) -> f64 {
        (self.fighters[0].x - self.fighters[1].x).abs()
    }

    /// Mutable access to both fighters at once.
    pub fn fighters_mut(&mut self) -> (&mut Fighter, &mut Fighter) {
        let [a, b] = &mut self.fighters;
        (a, b)
    }
}

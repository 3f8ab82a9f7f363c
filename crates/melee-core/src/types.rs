//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

/// Identifies a playable or boss character in static configuration.
pub type CharacterId = u32;

/// Identifies one attack within a character's move list.
pub type AttackId = u32;

/// Identifies a character's weapon loadout (0 = default set).
pub type LoadoutId = u8;

/// Fighter slot index: 0 is the player slot, 1 is the AI/boss slot.
pub type FighterId = usize;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += crate::constants::DT;
    }
}

/// Horizontal direction, derived from facing or movement input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Unit sign on the x axis (`Left` = -1, `Right` = +1).
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flip(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

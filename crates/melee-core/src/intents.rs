//! Per-tick fighter intents.
//!
//! An `Intent` is one fighter's requested action for the current tick,
//! produced fresh each tick by either the human-input adapter or the AI
//! brain. The engine applies it with priority block > jump > attack >
//! movement.

use serde::{Deserialize, Serialize};

use crate::enums::{AttackCommand, BlockZone, MoveDir};

/// One fighter's desired action this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Horizontal movement request.
    pub move_dir: MoveDir,
    /// Attack button pressed this tick, if any.
    pub attack: Option<AttackCommand>,
    /// Guard zone held this tick; `None` releases the block.
    pub block: Option<BlockZone>,
    /// Jump pressed this tick.
    pub jump: bool,
    /// Run modifier held (doubles walk speed).
    pub run: bool,
}

impl Intent {
    /// An empty intent: no movement, no buttons.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if nothing at all is requested.
    pub fn is_empty(&self) -> bool {
        self.move_dir == MoveDir::None
            && self.attack.is_none()
            && self.block.is_none()
            && !self.jump
    }
}

//! Short-lived buffered attack commands.
//!
//! An attack press that arrives while the fighter cannot start an attack is
//! held here and replayed once the fighter becomes actionable again, so
//! inputs pressed a few ticks early still come out. Entries expire after
//! `INPUT_BUFFER_TICKS`.

use std::collections::VecDeque;

use melee_core::constants::INPUT_BUFFER_TICKS;
use melee_core::enums::AttackCommand;

#[derive(Debug, Clone, Copy)]
struct BufferedCommand {
    command: AttackCommand,
    pressed_tick: u64,
}

/// FIFO of recent attack presses for one fighter.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    entries: VecDeque<BufferedCommand>,
}

impl InputBuffer {
    /// Record an attack press that could not start this tick.
    pub fn push(&mut self, command: AttackCommand, tick: u64) {
        self.entries.push_back(BufferedCommand {
            command,
            pressed_tick: tick,
        });
    }

    /// Pop the oldest still-fresh command, discarding expired ones.
    pub fn take_fresh(&mut self, tick: u64) -> Option<AttackCommand> {
        while let Some(entry) = self.entries.pop_front() {
            if tick.saturating_sub(entry.pressed_tick) <= INPUT_BUFFER_TICKS as u64 {
                return Some(entry.command);
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

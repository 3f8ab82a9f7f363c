//! Proximity rage burst.
//!
//! An anti-crowding mechanic for the boss slot: sustained opponent
//! proximity charges a timer, and when it fills the opponent is shoved
//! away with a heavy impulse. Leaving the radius resets the charge; a
//! cooldown gates retriggering. Configuration comes from the AI's active
//! phase, so the engine only runs this when a config is installed.

use melee_ai::profiles::RageBurstConfig;
use melee_core::events::GameEvent;
use melee_core::state::Fighter;

pub fn run(
    owner: &mut Fighter,
    opponent: &mut Fighter,
    config: &RageBurstConfig,
    tick: u64,
    events: &mut Vec<GameEvent>,
) {
    if owner.is_dead() || opponent.is_dead() {
        owner.proximity_ticks = 0;
        return;
    }
    if tick < owner.rage_cooldown_until {
        owner.proximity_ticks = 0;
        return;
    }
    if (owner.x - opponent.x).abs() > config.proximity_range {
        owner.proximity_ticks = 0;
        return;
    }

    owner.proximity_ticks += 1;
    if owner.proximity_ticks >= config.trigger_ticks {
        let away = if opponent.x < owner.x { -1.0 } else { 1.0 };
        opponent.impulse_vx = away * config.knockback;
        owner.proximity_ticks = 0;
        owner.rage_cooldown_until = tick + config.cooldown_ticks as u64;
        events.push(GameEvent::RageBurst { fighter: owner.id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melee_core::state::Fighter;

    fn pair(distance: f64) -> (Fighter, Fighter) {
        let boss = Fighter::spawn(1, 2, 0, 0.0, 500);
        let player = Fighter::spawn(0, 1, 0, -distance, 100);
        (boss, player)
    }

    fn config() -> RageBurstConfig {
        RageBurstConfig {
            proximity_range: 120.0,
            trigger_ticks: 3,
            knockback: 900.0,
            cooldown_ticks: 300,
        }
    }

    #[test]
    fn test_burst_fires_after_sustained_proximity() {
        let (mut boss, mut player) = pair(80.0);
        let cfg = config();
        let mut events = Vec::new();
        for tick in 0..3 {
            run(&mut boss, &mut player, &cfg, tick, &mut events);
        }
        assert_eq!(events, vec![GameEvent::RageBurst { fighter: 1 }]);
        assert!(player.impulse_vx < 0.0, "shoved away from the boss");
        assert_eq!(boss.proximity_ticks, 0);
        assert_eq!(boss.rage_cooldown_until, 2 + 300);
    }

    #[test]
    fn test_leaving_radius_resets_charge() {
        let (mut boss, mut player) = pair(80.0);
        let cfg = config();
        let mut events = Vec::new();
        run(&mut boss, &mut player, &cfg, 0, &mut events);
        run(&mut boss, &mut player, &cfg, 1, &mut events);
        player.x = -500.0;
        run(&mut boss, &mut player, &cfg, 2, &mut events);
        assert_eq!(boss.proximity_ticks, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_cooldown_blocks_charging() {
        let (mut boss, mut player) = pair(80.0);
        let cfg = config();
        let mut events = Vec::new();
        boss.rage_cooldown_until = 1000;
        for tick in 0..50 {
            run(&mut boss, &mut player, &cfg, tick, &mut events);
        }
        assert_eq!(boss.proximity_ticks, 0);
        assert!(events.is_empty());
    }
}

//! Host-side match loop.
//!
//! `MatchRunner` drives the engine at a fixed 60Hz from variable wall-clock
//! frames through an accumulator, feeds it the player's intent and the AI
//! brain's decision each tick, and watches for the end of the match. The
//! runner is still headless; presentation supplies intents and bone samples
//! through the two traits.

use melee_ai::AiBrain;
use melee_core::bones::BoneSamples;
use melee_core::constants::{DT, MAX_CATCHUP_TICKS};
use melee_core::enums::MatchPhase;
use melee_core::events::GameEvent;
use melee_core::intents::Intent;
use melee_core::state::MatchState;

use crate::engine::{MatchEngine, MatchSetup};

/// Source of the player's intent each tick (input adapter or scripted).
pub trait PlayerController {
    fn intent(&mut self, state: &MatchState) -> Intent;
}

/// Source of per-tick skeletal geometry, sampled by the presentation layer.
pub trait BoneSource {
    fn sample(&mut self, state: &MatchState) -> [BoneSamples; 2];
}

/// Fixed-timestep driver for one match.
pub struct MatchRunner {
    engine: MatchEngine,
    brain: AiBrain,
    accumulator: f64,
    phase: MatchPhase,
    /// Pairwise separation/facing toggle, cleared by scripted sequences.
    pub collision_enabled: bool,
}

impl MatchRunner {
    pub fn new(setup: MatchSetup, brain: AiBrain) -> Self {
        Self {
            engine: MatchEngine::new(setup),
            brain,
            accumulator: 0.0,
            phase: MatchPhase::Ready,
            collision_enabled: true,
        }
    }

    pub fn state(&self) -> &MatchState {
        self.engine.state()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Begin the fight.
    pub fn start(&mut self) -> Vec<GameEvent> {
        self.phase = MatchPhase::Fighting;
        self.accumulator = 0.0;
        vec![GameEvent::FightStart]
    }

    /// Reset the engine and begin a fresh fight with the same setup.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        self.engine.reset();
        self.start()
    }

    /// Drain `wall_dt` seconds of real time into fixed ticks. At most
    /// `MAX_CATCHUP_TICKS` run per call; any backlog beyond one tick is
    /// dropped so a long stall cannot trigger a tick spiral.
    pub fn advance(
        &mut self,
        wall_dt: f64,
        player: &mut dyn PlayerController,
        bones: &mut dyn BoneSource,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != MatchPhase::Fighting {
            return events;
        }
        self.accumulator += wall_dt;
        let mut ran = 0;
        while self.accumulator >= DT && ran < MAX_CATCHUP_TICKS {
            self.accumulator -= DT;
            ran += 1;
            events.extend(self.tick(player, bones));
            if self.phase != MatchPhase::Fighting {
                break;
            }
        }
        self.accumulator = self.accumulator.min(DT);
        events
    }

    fn tick(
        &mut self,
        player: &mut dyn PlayerController,
        bones: &mut dyn BoneSource,
    ) -> Vec<GameEvent> {
        let player_intent = player.intent(self.engine.state());
        let observation = melee_ai::Observation::capture(self.engine.state(), 1);
        let decision = self.brain.decide(
            &observation,
            self.engine.state().time.tick,
            self.engine.library(),
        );
        let samples = bones.sample(self.engine.state());

        let mut events = self.engine.step(
            [player_intent, decision.intent],
            &samples,
            self.collision_enabled,
        );
        events.extend(self.engine.apply_ai_decision(1, &decision.modifiers));

        events.extend(self.check_victory());
        events
    }

    /// End the match once a fighter dies. Boss death is a player win;
    /// player death (including a double KO) ends the game.
    fn check_victory(&mut self) -> Vec<GameEvent> {
        let fighters = &self.engine.state().fighters;
        let mut events = Vec::new();
        if fighters[0].is_dead() {
            events.push(GameEvent::GameOver);
            self.phase = MatchPhase::Finished;
        } else if fighters[1].is_dead() {
            events.push(GameEvent::FightWon { winner: 0 });
            self.phase = MatchPhase::Finished;
        }
        events
    }
}

//! Session shell
//!
//! Owns the simulation state and the high-score store, and converts
//! variable frame times into fixed simulation ticks.

use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameEvent, GamePhase, GameState, TickInput, tick};

/// A running game: state, persistence and the fixed-step clock
pub struct Game<S: HighScoreStore> {
    state: GameState,
    store: S,
    accumulator: f32,
}

impl<S: HighScoreStore> Game<S> {
    /// New game sitting at the menu, with the stored best score loaded
    pub fn new(settings: &Settings, store: S) -> Self {
        let seed = settings.resolve_seed();
        let mut state = GameState::new(seed, settings.sim_config());
        state.high_score = store.load_high_score();
        log::info!("Tank Arena ready (seed {}, high score {})", seed, state.high_score);
        Self {
            state,
            store,
            accumulator: 0.0,
        }
    }

    /// Run as many fixed steps as `frame_dt` seconds cover.
    ///
    /// One-shot presses in `input` are seen by the first step only. Returns
    /// the events raised during this frame.
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        self.accumulator += frame_dt.max(0.0);

        let mut input = input.clone();
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.clear_one_shots();
            self.drain_events(&mut events);
        }

        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        events
    }

    fn drain_events(&mut self, out: &mut Vec<GameEvent>) {
        for event in self.state.events.drain(..) {
            if let GameEvent::GameOver {
                score,
                new_high_score: true,
                ..
            } = event
            {
                if let Err(err) = self.store.save_high_score(score) {
                    log::error!("Failed to save high score: {}", err);
                }
            }
            out.push(event);
        }
    }

    /// Read-only view for drawing the current frame
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot::capture(&self.state)
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

//! Match session controller
//!
//! Owns one [`GameState`] for the lifetime of a match: feeds it one tick per
//! host frame, forwards pause requests, and hands a [`MatchSummary`] to the
//! results flow exactly once when the match ends.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Final numbers for the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub won: bool,
    pub score: u32,
    pub enemies_defeated: u32,
    pub elapsed_millis: u64,
}

impl MatchSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            won: state.is_won(),
            score: state.score,
            enemies_defeated: state.enemies_defeated,
            elapsed_millis: state.elapsed_millis(),
        }
    }

    /// Whole seconds played
    pub fn seconds_played(&self) -> u64 {
        self.elapsed_millis / 1000
    }

    /// Record this result under `name`.
    ///
    /// Blank names are rejected; returns the leaderboard rank when recorded.
    pub fn submit(&self, scores: &mut HighScores, name: &str) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let rank = scores.add_score(name, self.score);
        match rank {
            Some(rank) => log::info!("{} placed #{} with {}", name, rank, self.score),
            None => log::info!("{} scored {}, not a high score", name, self.score),
        }
        rank
    }
}

/// One match in progress
#[derive(Debug)]
pub struct Session {
    state: GameState,
    pending_pause: bool,
    last_phase: GamePhase,
    reported: bool,
}

impl Session {
    pub fn new(settings: &Settings, tuning: Tuning, seed: u64) -> Self {
        log::info!(
            "Starting match: seed {}, ship {}, world {:?}",
            seed,
            settings.ship.as_str(),
            settings.world
        );
        let state = GameState::with_config(seed, settings, tuning);
        Self {
            last_phase: state.phase,
            state,
            pending_pause: false,
            reported: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for host scripting (scenario setup, debug spawns)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Request a pause toggle on the next frame
    pub fn toggle_pause(&mut self) {
        self.pending_pause = !self.pending_pause;
    }

    /// Run one frame.
    ///
    /// Returns the summary on the frame the match ends, `None` otherwise.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Option<MatchSummary> {
        let dt = if dt.is_finite() { dt.min(MAX_FRAME_DT) } else { dt };

        let mut input = input.clone();
        input.pause |= std::mem::take(&mut self.pending_pause);
        tick(&mut self.state, &input, dt);

        if self.state.phase != self.last_phase {
            log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            self.last_phase = self.state.phase;
        }

        if self.state.is_ended() && !self.reported {
            self.reported = true;
            return Some(MatchSummary::from_state(&self.state));
        }
        None
    }

    /// Drain events raised since the previous call (for audio/FX)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.state.take_events()
    }

    /// Summary once the match is over
    pub fn summary(&self) -> Option<MatchSummary> {
        self.state
            .is_ended()
            .then(|| MatchSummary::from_state(&self.state))
    }
}

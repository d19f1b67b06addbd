//! Interactive session: one generation per tick.
//!
//! A [`Session`] holds what an interactive front end needs between frames:
//! the live parameters, the current state, a generation counter and a rolling
//! history window. It performs no timing or rendering; the caller decides
//! when to tick.
//!
//! Auto-run stops by itself once a step would change both demes by less than
//! the settle threshold, or would leave a non-finite frequency. That final
//! step is not applied.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::base::AlleleState;
use crate::errors::SimulationError;
use crate::simulation::{step, ModelParameters};

/// Per-tick change below which auto-run stops.
pub const DEFAULT_SETTLE_THRESHOLD: f64 = 1e-6;

/// Number of states kept in the rolling history.
pub const DEFAULT_HISTORY_WINDOW: usize = 100;

/// State a fresh or reset session starts from.
pub const DEFAULT_SESSION_STATE: AlleleState = AlleleState::new_unchecked(0.7, 0.1);

/// What a call to [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickOutcome {
    /// Auto-run is off; nothing changed.
    Paused,
    /// The next step was below the settle threshold. Auto-run is now off and
    /// the state is unchanged.
    Settled,
    /// The next step produced a non-finite frequency (zero mean fitness).
    /// Auto-run is now off and the state is unchanged.
    Diverged,
    /// One generation was applied.
    Advanced(AlleleState),
}

/// Live simulation state for an interactive front end.
#[derive(Debug, Clone)]
pub struct Session {
    params: ModelParameters,
    state: AlleleState,
    generation: usize,
    history: VecDeque<AlleleState>,
    window: usize,
    settle_threshold: f64,
    running: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_settings(DEFAULT_HISTORY_WINDOW, DEFAULT_SETTLE_THRESHOLD)
    }
}

impl Session {
    /// Session with default parameters, state and settings, paused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a custom history window and settle threshold.
    ///
    /// A window of zero is treated as one.
    pub fn with_settings(window: usize, settle_threshold: f64) -> Self {
        let window = window.max(1);
        let mut history = VecDeque::with_capacity(window);
        history.push_back(DEFAULT_SESSION_STATE);
        Self {
            params: ModelParameters::default(),
            state: DEFAULT_SESSION_STATE,
            generation: 0,
            history,
            window,
            settle_threshold,
            running: false,
        }
    }

    /// Replace the parameters; takes effect on the next tick.
    pub fn set_parameters(&mut self, params: ModelParameters) -> Result<(), SimulationError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Replace the current state without touching the generation counter.
    pub fn set_state(&mut self, state: AlleleState) -> Result<(), SimulationError> {
        state.validate()?;
        self.state = state;
        self.push_history(state);
        Ok(())
    }

    /// Advance one generation if auto-run is on.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Paused;
        }

        let next = step(self.state, &self.params);
        if !next.is_finite() {
            self.running = false;
            warn!(generation = self.generation, state = %self.state, "session step is not finite");
            return TickOutcome::Diverged;
        }
        if next.is_within(&self.state, self.settle_threshold) {
            self.running = false;
            debug!(generation = self.generation, state = %self.state, "session settled");
            return TickOutcome::Settled;
        }

        self.state = next;
        self.generation += 1;
        self.push_history(next);
        TickOutcome::Advanced(next)
    }

    /// Flip auto-run; returns the new value.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Restore default parameters and state, clear the history and pause.
    pub fn reset(&mut self) {
        self.params = ModelParameters::default();
        self.state = DEFAULT_SESSION_STATE;
        self.generation = 0;
        self.history.clear();
        self.history.push_back(DEFAULT_SESSION_STATE);
        self.running = false;
    }

    fn push_history(&mut self, state: AlleleState) {
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(state);
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    pub fn state(&self) -> AlleleState {
        self.state
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Recent states, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &AlleleState> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

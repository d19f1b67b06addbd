//! Classification of final states.

use std::fmt;

use demedrive_sim::base::AlleleState;
use serde::{Deserialize, Serialize};

/// Distance from a boundary within which a deme counts as fixed or lost.
pub const DEFAULT_OUTCOME_TOLERANCE: f64 = 1e-6;

/// Qualitative end state of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Drive high in the target deme and low in the non-target deme
    DifferentialTargeting,
    /// Both demes at or above `1 - eps`
    Fixation,
    /// Both demes at or below `eps`
    Loss,
    /// Anything else
    Mixed,
}

impl Outcome {
    /// Classify with [`DEFAULT_OUTCOME_TOLERANCE`].
    pub fn classify(state: AlleleState) -> Self {
        Self::classify_with(state, DEFAULT_OUTCOME_TOLERANCE)
    }

    /// Classify with tolerance `eps`.
    ///
    /// Fixation and loss are checked first: a converged trajectory sits a
    /// hair inside (0, 1) and would otherwise pass the strict differential
    /// targeting test.
    pub fn classify_with(state: AlleleState, eps: f64) -> Self {
        if state.q1 >= 1.0 - eps && state.q2 >= 1.0 - eps {
            Outcome::Fixation
        } else if state.q1 <= eps && state.q2 <= eps {
            Outcome::Loss
        } else if state.has_differential_targeting() {
            Outcome::DifferentialTargeting
        } else {
            Outcome::Mixed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::DifferentialTargeting => "differential targeting",
            Outcome::Fixation => "fixation",
            Outcome::Loss => "loss",
            Outcome::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

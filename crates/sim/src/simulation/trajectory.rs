//! Trajectory history and the result of a run.

use serde::{Deserialize, Serialize};

use crate::base::{AlleleState, Deme};
use crate::errors::SimulationError;
use crate::simulation::RunConfig;

/// Ordered per-generation states, generation 0 first.
///
/// A trajectory is never empty: it always holds at least the initial state.
/// It is append-only while a run is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrajectoryRecord")]
pub struct Trajectory {
    states: Vec<AlleleState>,
}

/// Serialized form, checked before it becomes a [`Trajectory`].
#[derive(Deserialize)]
struct TrajectoryRecord {
    states: Vec<AlleleState>,
}

impl TryFrom<TrajectoryRecord> for Trajectory {
    type Error = SimulationError;

    fn try_from(record: TrajectoryRecord) -> Result<Self, Self::Error> {
        Self::try_from(record.states)
    }
}

impl TryFrom<Vec<AlleleState>> for Trajectory {
    type Error = SimulationError;

    fn try_from(states: Vec<AlleleState>) -> Result<Self, Self::Error> {
        if states.is_empty() {
            return Err(SimulationError::EmptyTrajectory);
        }
        Ok(Self { states })
    }
}

impl Trajectory {
    /// Start a trajectory at `initial`.
    pub fn new(initial: AlleleState) -> Self {
        Self::with_capacity(initial, 1)
    }

    /// Start a trajectory with room for `capacity` states.
    pub fn with_capacity(initial: AlleleState, capacity: usize) -> Self {
        let mut states = Vec::with_capacity(capacity.max(1));
        states.push(initial);
        Self { states }
    }

    /// Append the state of the next generation.
    #[inline]
    pub fn push(&mut self, state: AlleleState) {
        self.states.push(state);
    }

    /// Number of recorded states (generations executed + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: construction and deserialization both require the
    /// initial state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of generations covered (`len - 1`).
    #[inline]
    pub fn generations(&self) -> usize {
        self.states.len() - 1
    }

    /// State at generation `generation`, if recorded.
    #[inline]
    pub fn get(&self, generation: usize) -> Option<&AlleleState> {
        self.states.get(generation)
    }

    /// Generation 0.
    #[inline]
    pub fn initial(&self) -> &AlleleState {
        &self.states[0]
    }

    /// Most recent state.
    #[inline]
    pub fn last(&self) -> &AlleleState {
        &self.states[self.states.len() - 1]
    }

    /// All states as a slice.
    #[inline]
    pub fn states(&self) -> &[AlleleState] {
        &self.states
    }

    /// Iterate over states in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &AlleleState> {
        self.states.iter()
    }

    /// Frequencies of one deme across all generations.
    pub fn deme(&self, deme: Deme) -> Vec<f64> {
        self.states.iter().map(|s| s.get(deme)).collect()
    }

    /// Target-deme history (`q1`).
    pub fn target(&self) -> Vec<f64> {
        self.deme(Deme::Target)
    }

    /// Non-target-deme history (`q2`).
    pub fn non_target(&self) -> Vec<f64> {
        self.deme(Deme::NonTarget)
    }

    /// Keep only the first `len` states (at least the initial one).
    pub fn truncated(&self, len: usize) -> Self {
        let keep = len.clamp(1, self.states.len());
        Self {
            states: self.states[..keep].to_vec(),
        }
    }

    /// Split into per-deme histories `(q1_history, q2_history)`.
    pub fn into_histories(self) -> (Vec<f64>, Vec<f64>) {
        self.states.into_iter().map(|s| (s.q1, s.q2)).unzip()
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
    /// The last step changed both demes by less than the threshold.
    Converged,
    /// The generation budget ran out first.
    Exhausted,
}

/// Output of a trajectory run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceResult {
    /// State at termination
    pub final_state: AlleleState,
    /// Every state from generation 0 to termination
    pub trajectory: Trajectory,
    /// Generation index at termination
    pub generations: usize,
}

impl ConvergenceResult {
    /// Recompute whether the last step was below `threshold` in both demes.
    ///
    /// Runs that stop after zero generations never count as converged.
    pub fn converged(&self, threshold: f64) -> bool {
        let states = self.trajectory.states();
        match states {
            [.., previous, last] => last.is_within(previous, threshold),
            _ => false,
        }
    }

    /// True when the run used its whole generation budget.
    pub fn exhausted(&self, max_generations: usize) -> bool {
        self.generations >= max_generations
    }

    /// Classify the termination under the settings the run used.
    ///
    /// A run that converges on its very last allowed generation reports
    /// [`Termination::Converged`].
    pub fn termination(&self, config: &RunConfig) -> Termination {
        if self.converged(config.convergence_threshold) {
            Termination::Converged
        } else {
            Termination::Exhausted
        }
    }

    /// Flat form `(q1_final, q2_final, q1_history, q2_history)`.
    pub fn into_parts(self) -> (f64, f64, Vec<f64>, Vec<f64>) {
        let (q1_history, q2_history) = self.trajectory.into_histories();
        (self.final_state.q1, self.final_state.q2, q1_history, q2_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trajectory {
        let mut t = Trajectory::new(AlleleState::new_unchecked(0.5, 0.1));
        t.push(AlleleState::new_unchecked(0.6, 0.2));
        t.push(AlleleState::new_unchecked(0.65, 0.25));
        t
    }

    #[test]
    fn test_lengths() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.generations(), 2);
        assert!(!t.is_empty());
        assert_eq!(t.initial().q1, 0.5);
        assert_eq!(t.last().q2, 0.25);
    }

    #[test]
    fn test_deserialize_rejects_empty_history() {
        let err = serde_json::from_str::<Trajectory>(r#"{"states":[]}"#).unwrap_err();
        assert!(err.to_string().contains("at least the initial state"));

        let json = r#"{
            "final_state": {"q1": 0.5, "q2": 0.1},
            "trajectory": {"states": []},
            "generations": 0
        }"#;
        assert!(serde_json::from_str::<ConvergenceResult>(json).is_err());
    }

    #[test]
    fn test_json_roundtrip_keeps_states() {
        let t = sample();
        let json = serde_json::to_string(&t).unwrap();
        let loaded: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, t);
        assert_eq!(loaded.last().q1, 0.65);
    }

    #[test]
    fn test_try_from_vec() {
        assert_eq!(
            Trajectory::try_from(Vec::new()),
            Err(SimulationError::EmptyTrajectory)
        );
        let t = Trajectory::try_from(vec![AlleleState::LOST]).unwrap();
        assert_eq!(t.generations(), 0);
    }

    #[test]
    fn test_deme_projections() {
        let t = sample();
        assert_eq!(t.target(), vec![0.5, 0.6, 0.65]);
        assert_eq!(t.non_target(), vec![0.1, 0.2, 0.25]);
    }

    #[test]
    fn test_truncated() {
        let t = sample();
        assert_eq!(t.truncated(2).len(), 2);
        assert_eq!(t.truncated(0).len(), 1);
        assert_eq!(t.truncated(100).len(), 3);
    }

    #[test]
    fn test_into_histories() {
        let (q1, q2) = sample().into_histories();
        assert_eq!(q1.len(), 3);
        assert_eq!(q2[1], 0.2);
    }

    #[test]
    fn test_converged_recomputes_last_delta() {
        let mut t = Trajectory::new(AlleleState::new_unchecked(0.5, 0.5));
        t.push(AlleleState::new_unchecked(0.5, 0.5));
        let result = ConvergenceResult {
            final_state: *t.last(),
            trajectory: t,
            generations: 1,
        };
        assert!(result.converged(1e-10));
        assert!(!result.exhausted(10));
        assert_eq!(
            result.termination(&RunConfig::default()),
            Termination::Converged
        );
    }

    #[test]
    fn test_single_state_never_converged() {
        let t = Trajectory::new(AlleleState::new_unchecked(0.5, 0.5));
        let result = ConvergenceResult {
            final_state: *t.last(),
            trajectory: t,
            generations: 0,
        };
        assert!(!result.converged(1.0));
    }
}

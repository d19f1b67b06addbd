//! Trajectory runner.
//!
//! Repeatedly applies the recurrence until both demes change by less than the
//! convergence threshold in a single generation, or until the generation
//! budget is used up. Running out of budget is a normal way for a run to end;
//! callers that care can ask the result how it terminated.

use tracing::debug;

use crate::base::AlleleState;
use crate::errors::SimulationError;
use crate::simulation::{
    step, ConvergenceResult, ModelParameters, RunConfig, Termination, Trajectory,
};

/// Preallocation cap for trajectories; most runs converge within a few
/// hundred generations.
const INITIAL_CAPACITY: usize = 1024;

/// Runs full trajectories for a fixed parameter set.
///
/// # Examples
///
/// ```
/// use demedrive_sim::base::AlleleState;
/// use demedrive_sim::simulation::{ModelParameters, RunConfig, TrajectoryRunner};
///
/// let params = ModelParameters::new(0.5, 0.6, 0.3, 0.02, 1.0).unwrap();
/// let runner = TrajectoryRunner::new(params, RunConfig::default()).unwrap();
/// let result = runner.run(AlleleState::new(0.9, 0.1).unwrap()).unwrap();
///
/// assert_eq!(result.trajectory.len(), result.generations + 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryRunner {
    params: ModelParameters,
    config: RunConfig,
}

impl TrajectoryRunner {
    /// Create a runner after validating parameters and settings.
    pub fn new(params: ModelParameters, config: RunConfig) -> Result<Self, SimulationError> {
        params.validate()?;
        config.validate()?;
        Ok(Self { params, config })
    }

    /// Model parameters used by this runner.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Run settings used by this runner.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run from `initial` until convergence or budget exhaustion.
    ///
    /// # Errors
    /// Returns an error if `initial` is outside [0, 1] or if the recurrence
    /// produces a non-finite frequency.
    pub fn run(&self, initial: AlleleState) -> Result<ConvergenceResult, SimulationError> {
        initial.validate()?;
        let result = run(&self.params, initial, &self.config);
        if let Some(generation) = result.trajectory.iter().position(|s| !s.is_finite()) {
            return Err(SimulationError::NonFinite { generation });
        }
        Ok(result)
    }
}

/// Run a trajectory without validation.
///
/// Mirrors [`TrajectoryRunner::run`] but follows IEEE-754 semantics for
/// degenerate inputs: a NaN state never satisfies the convergence test, so
/// such a run simply exhausts its budget.
pub fn run(
    params: &ModelParameters,
    initial: AlleleState,
    config: &RunConfig,
) -> ConvergenceResult {
    let capacity = config.max_generations.saturating_add(1).min(INITIAL_CAPACITY);
    let mut trajectory = Trajectory::with_capacity(initial, capacity);
    let mut current = initial;
    let mut generation = 0;

    while generation < config.max_generations {
        let next = step(current, params);
        generation += 1;

        trajectory.push(next);
        let settled = next.is_within(&current, config.convergence_threshold);
        current = next;

        if settled {
            debug!(generation, final_state = %current, "trajectory converged");
            return ConvergenceResult {
                final_state: current,
                trajectory,
                generations: generation,
            };
        }
    }

    debug!(
        generation,
        final_state = %current,
        termination = ?Termination::Exhausted,
        "generation budget exhausted"
    );
    ConvergenceResult {
        final_state: current,
        trajectory,
        generations: generation,
    }
}

/// Scalar form of [`run`]:
/// `(s, c, h, m, alpha, q1_0, q2_0, max_generations, threshold) -> (q1, q2, q1_history, q2_history)`.
#[allow(clippy::too_many_arguments)]
pub fn run_frequencies(
    s: f64,
    c: f64,
    h: f64,
    m: f64,
    alpha: f64,
    q1_0: f64,
    q2_0: f64,
    max_generations: usize,
    convergence_threshold: f64,
) -> (f64, f64, Vec<f64>, Vec<f64>) {
    let params = ModelParameters::new_unchecked(s, c, h, m, alpha);
    let config = RunConfig {
        max_generations,
        convergence_threshold,
    };
    run(&params, AlleleState::new_unchecked(q1_0, q2_0), &config).into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_run_converges_to_fixation() {
        let params = ModelParameters::new(0.5, 0.8, 0.3, 0.05, 1.0).unwrap();
        let result = run(
            &params,
            AlleleState::new_unchecked(0.7, 0.1),
            &RunConfig::default(),
        );
        assert_eq!(result.generations, 33);
        assert_eq!(result.trajectory.len(), 34);
        assert!(result.final_state.q1 > 0.999_999);
        assert!(result.final_state.q2 > 0.999_999);
        assert!(result.converged(1e-10));
    }

    #[test]
    fn test_budget_exhaustion_is_not_an_error() {
        let params = ModelParameters::new(0.5, 0.6, 0.3, 0.02, 1.0).unwrap();
        let config = RunConfig::new(5, 1e-10).unwrap();
        let runner = TrajectoryRunner::new(params, config).unwrap();
        let result = runner.run(AlleleState::new(0.9, 0.1).unwrap()).unwrap();

        assert_eq!(result.generations, 5);
        assert_eq!(result.trajectory.len(), 6);
        assert!(result.exhausted(5));
        assert_eq!(result.termination(&config), Termination::Exhausted);
        assert_eq!(result.final_state, *result.trajectory.last());
    }

    #[test]
    fn test_fixed_point_converges_after_one_generation() {
        let params = ModelParameters::new(0.5, 0.8, 0.3, 0.05, 1.0).unwrap();
        let result = run(&params, AlleleState::LOST, &RunConfig::default());
        assert_eq!(result.generations, 1);
        assert_eq!(result.trajectory.len(), 2);
        assert_eq!(result.final_state, AlleleState::LOST);
    }

    #[test]
    fn test_checked_run_rejects_invalid_initial_state() {
        let runner =
            TrajectoryRunner::new(ModelParameters::default(), RunConfig::default()).unwrap();
        let err = runner.run(AlleleState::new_unchecked(-0.5, 0.1)).unwrap_err();
        assert!(matches!(err, SimulationError::State(_)));
    }

    #[test]
    fn test_checked_run_reports_non_finite_generation() {
        let params = ModelParameters::new(1.0, 1.0, 0.5, 0.0, 1.0).unwrap();
        let runner = TrajectoryRunner::new(params, RunConfig::default()).unwrap();
        let err = runner.run(AlleleState::FIXED).unwrap_err();
        assert_eq!(err, SimulationError::NonFinite { generation: 1 });
    }

    #[test]
    fn test_unchecked_run_with_nan_exhausts_budget() {
        let params = ModelParameters::new_unchecked(1.0, 1.0, 0.5, 0.0, 1.0);
        let config = RunConfig::new(7, 1e-10).unwrap();
        let result = run(&params, AlleleState::FIXED, &config);
        assert_eq!(result.generations, 7);
        assert!(result.final_state.q1.is_nan());
    }

    #[test]
    fn test_runner_rejects_invalid_settings() {
        let params = ModelParameters::default();
        let bad = RunConfig {
            max_generations: 0,
            convergence_threshold: 1e-10,
        };
        assert!(matches!(
            TrajectoryRunner::new(params, bad),
            Err(SimulationError::RunConfig(_))
        ));
    }

    #[test]
    fn test_scalar_run_form() {
        let (q1, q2, h1, h2) =
            run_frequencies(0.5, 0.8, 0.3, 0.05, 1.0, 0.7, 0.1, 10_000, 1e-10);
        assert_eq!(h1.len(), h2.len());
        assert_eq!(h1[0], 0.7);
        assert_eq!(h2[0], 0.1);
        assert_eq!(*h1.last().unwrap(), q1);
        assert_eq!(*h2.last().unwrap(), q2);
    }
}

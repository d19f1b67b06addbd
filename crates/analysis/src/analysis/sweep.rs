//! Parameter sweeps
//!
//! - [`compare_alpha`]: one trajectory per migration asymmetry, truncated to
//!   a display window.
//! - [`critical_grid`]: critical migration threshold for every `(s, c, h,
//!   alpha)` configuration of a grid, computed in parallel.

use demedrive_sim::base::AlleleState;
use demedrive_sim::errors::SimulationError;
use demedrive_sim::simulation::{
    CriticalSearch, ModelParameters, RunConfig, SearchConfig, Trajectory, TrajectoryRunner,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use super::Outcome;

/// Asymmetries compared by default.
pub const DEFAULT_ALPHAS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 10.0];

/// Starting state of the alpha comparison: drive common in the target deme,
/// nearly absent from the non-target deme.
pub const DEFAULT_ALPHA_INITIAL: AlleleState = AlleleState::new_unchecked(0.7, 0.001);

/// Generations kept per trajectory in the alpha comparison.
pub const DEFAULT_ALPHA_WINDOW: usize = 100;

/// One trajectory of an alpha comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaTrajectory {
    pub alpha: f64,
    /// Final state of the full run, not of the truncated window
    pub final_state: AlleleState,
    pub generations: usize,
    pub outcome: Outcome,
    /// The first `window` states of the run
    pub trajectory: Trajectory,
}

/// Run one trajectory per value of `alpha`, keeping the first `window`
/// states of each.
///
/// # Errors
/// Fails on the first `alpha` for which the parameters are invalid
/// (including `alpha * m > 1`), or if a run produces non-finite values.
pub fn compare_alpha(
    base: &ModelParameters,
    alphas: &[f64],
    initial: AlleleState,
    config: &RunConfig,
    window: usize,
) -> Result<Vec<AlphaTrajectory>, SimulationError> {
    let _span = info_span!("compare_alpha", alphas = alphas.len(), m = base.m).entered();

    alphas
        .iter()
        .map(|&alpha| {
            let params = base.with_alpha(alpha)?;
            let result = TrajectoryRunner::new(params, *config)?.run(initial)?;
            debug!(alpha, generations = result.generations, "alpha trajectory finished");
            Ok(AlphaTrajectory {
                alpha,
                final_state: result.final_state,
                generations: result.generations,
                outcome: Outcome::classify(result.final_state),
                trajectory: result.trajectory.truncated(window),
            })
        })
        .collect()
}

/// Selection coefficients and asymmetry of one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub s: f64,
    pub c: f64,
    pub h: f64,
    pub alpha: f64,
}

impl GridConfig {
    pub fn new(s: f64, c: f64, h: f64, alpha: f64) -> Self {
        Self { s, c, h, alpha }
    }

    /// Every combination of the given values, `s` varying slowest.
    pub fn cartesian(s: &[f64], c: &[f64], h: &[f64], alpha: &[f64]) -> Vec<Self> {
        let mut configs = Vec::with_capacity(s.len() * c.len() * h.len() * alpha.len());
        for &s in s {
            for &c in c {
                for &h in h {
                    for &alpha in alpha {
                        configs.push(Self::new(s, c, h, alpha));
                    }
                }
            }
        }
        configs
    }

    fn params(&self) -> ModelParameters {
        ModelParameters::new_unchecked(self.s, self.c, self.h, 0.0, self.alpha)
    }
}

/// Critical threshold of one grid point.
///
/// Invalid configurations are reported per row instead of failing the
/// whole grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub config: GridConfig,
    pub m_star: Option<f64>,
    pub iterations: Option<usize>,
    pub error: Option<String>,
}

/// Critical migration threshold for every configuration.
///
/// Searches run in parallel; rows come back in input order.
pub fn critical_grid(
    configs: &[GridConfig],
    initial: AlleleState,
    search: &SearchConfig,
) -> Vec<GridRow> {
    critical_grid_with(configs, initial, search, |_| {})
}

/// [`critical_grid`] with a callback invoked as each row completes, in
/// completion order. Used to drive progress reporting.
pub fn critical_grid_with<F>(
    configs: &[GridConfig],
    initial: AlleleState,
    search: &SearchConfig,
    on_row: F,
) -> Vec<GridRow>
where
    F: Fn(&GridRow) + Sync + Send,
{
    let _span = info_span!("critical_grid", configs = configs.len()).entered();

    configs
        .par_iter()
        .map(|config| {
            let row = match CriticalSearch::with_config(config.params(), initial, *search) {
                Ok(search) => {
                    let result = search.run();
                    GridRow {
                        config: *config,
                        m_star: Some(result.m_star),
                        iterations: Some(result.iterations),
                        error: None,
                    }
                }
                Err(e) => GridRow {
                    config: *config,
                    m_star: None,
                    iterations: None,
                    error: Some(e.to_string()),
                },
            };
            on_row(&row);
            row
        })
        .collect()
}

//! Initial-condition scans
//!
//! Run one trajectory per starting state under a fixed parameter set and
//! summarise where each one ends up.

use demedrive_sim::base::AlleleState;
use demedrive_sim::errors::SimulationError;
use demedrive_sim::simulation::{ModelParameters, RunConfig, Termination, TrajectoryRunner};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info_span;

use super::Outcome;

/// Summary of one trajectory in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanRow {
    pub initial: AlleleState,
    pub final_state: AlleleState,
    pub generations: usize,
    pub termination: Termination,
    pub outcome: Outcome,
}

/// Run one trajectory per initial condition.
///
/// Trajectories run in parallel; rows come back in input order.
///
/// # Errors
/// Fails if the parameters or run settings are invalid, or on the first
/// initial state that is out of range or produces a non-finite trajectory.
pub fn scan_initial_conditions(
    params: &ModelParameters,
    initials: &[AlleleState],
    config: &RunConfig,
) -> Result<Vec<ScanRow>, SimulationError> {
    let _span = info_span!("scan_initial_conditions", conditions = initials.len()).entered();
    let runner = TrajectoryRunner::new(*params, *config)?;

    initials
        .par_iter()
        .map(|&initial| {
            let result = runner.run(initial)?;
            Ok(ScanRow {
                initial,
                final_state: result.final_state,
                generations: result.generations,
                termination: result.termination(config),
                outcome: Outcome::classify(result.final_state),
            })
        })
        .collect()
}

//! The per-generation recurrence.
//!
//! One generation is migration followed by selection. [`step`] is pure and
//! deterministic: identical floating-point inputs always give bit-identical
//! outputs, so interactive callers can advance one tick at a time and batch
//! callers can replay any trajectory exactly.
//!
//! The raw entry points do no validation. Inputs outside [0, 1] or degenerate
//! parameters propagate as out-of-range values, infinities or NaN following
//! IEEE-754 semantics. [`step_checked`] validates its inputs and reports a
//! non-finite result as an error instead.

use crate::base::AlleleState;
use crate::errors::SimulationError;
use crate::evolution::GenerationPhase;
use crate::simulation::ModelParameters;

/// Advance both demes by one generation.
#[inline]
pub fn step(state: AlleleState, params: &ModelParameters) -> AlleleState {
    let post_migration = params.migration().apply(state);
    params.selection().apply(post_migration)
}

/// Scalar form of [`step`]: `(q1, q2, s, c, h, m, alpha) -> (q1', q2')`.
#[inline]
pub fn step_frequencies(
    q1: f64,
    q2: f64,
    s: f64,
    c: f64,
    h: f64,
    m: f64,
    alpha: f64,
) -> (f64, f64) {
    let params = ModelParameters::new_unchecked(s, c, h, m, alpha);
    step(AlleleState::new_unchecked(q1, q2), &params).as_tuple()
}

/// Validated form of [`step`].
///
/// # Errors
/// Returns an error if the state or parameters are outside their documented
/// ranges, or if the mean fitness of either deme is zero.
pub fn step_checked(
    state: AlleleState,
    params: &ModelParameters,
) -> Result<AlleleState, SimulationError> {
    state.validate()?;
    params.validate()?;
    let next = step(state, params);
    if !next.is_finite() {
        return Err(SimulationError::NonFinite { generation: 1 });
    }
    Ok(next)
}

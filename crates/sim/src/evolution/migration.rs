//! Migration between the two demes.
//!
//! Migration happens before selection in every generation. A fraction `m` of
//! the target deme's gene pool arrives from the non-target deme, and a
//! fraction `alpha * m` flows the other way. With `alpha = 1` the exchange is
//! symmetric; `alpha < 1` means fewer migrants leave the target deme, which
//! is the favourable case for keeping the drive confined.
//!
//! The post-migration frequencies are weighted blends of the two demes:
//!
//! ```text
//! q1' = ((1 - αm) q1 + m q2) / (1 - αm + m)
//! q2' = ((1 - m) q2 + αm q1) / (1 - m + αm)
//! ```
//!
//! Values are not clamped; for `m` and `αm` in [0, 1] the result stays in
//! [0, 1] whenever the inputs do.

use serde::{Deserialize, Serialize};

use super::GenerationPhase;
use crate::base::AlleleState;

/// Asymmetric two-deme migration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MigrationModel {
    /// Baseline migration rate (non-target -> target)
    pub m: f64,
    /// Ratio of reverse to baseline migration
    pub alpha: f64,
}

impl MigrationModel {
    /// Create a migration model. No range checks are performed here; see
    /// [`ModelParameters::new`](crate::simulation::ModelParameters::new).
    pub const fn new(m: f64, alpha: f64) -> Self {
        Self { m, alpha }
    }

    /// Migration rate from the target deme to the non-target deme (`αm`).
    #[inline]
    pub fn reverse_rate(&self) -> f64 {
        self.alpha * self.m
    }

    /// Denominator of the target-deme blend, `1 - αm + m`.
    #[inline]
    pub fn target_denominator(&self) -> f64 {
        1.0 - self.alpha * self.m + self.m
    }

    /// Denominator of the non-target-deme blend, `1 - m + αm`.
    #[inline]
    pub fn non_target_denominator(&self) -> f64 {
        1.0 - self.m + self.alpha * self.m
    }

    /// True when neither deme receives migrants.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.m == 0.0
    }
}

impl GenerationPhase for MigrationModel {
    #[inline]
    fn apply(&self, state: AlleleState) -> AlleleState {
        let m = self.m;
        let alpha = self.alpha;
        let AlleleState { q1, q2 } = state;

        let q1_post = ((1.0 - alpha * m) * q1 + m * q2) / (1.0 - alpha * m + m);
        let q2_post = ((1.0 - m) * q2 + alpha * m * q1) / (1.0 - m + alpha * m);

        AlleleState::new_unchecked(q1_post, q2_post)
    }
}

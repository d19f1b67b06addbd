//! Conversion and selection acting on the drive allele.
//!
//! Genotype frequencies are taken from Hardy-Weinberg proportions of the
//! post-migration frequency `q` and reweighted by genotype fitness. Conversion
//! happens in the germline of heterozygotes before selection:
//!
//! - **Converted heterozygotes** (probability `c`) behave as drive
//!   homozygotes and pay the full cost: `s_c = c (1 - s)`.
//! - **Non-converted heterozygotes** (probability `1 - c`) transmit the drive
//!   with Mendelian probability one half and pay the dominant share of the
//!   cost: `s_n = ½ (1 - c)(1 - h s)`.
//!
//! Mean fitness and the next-generation frequency are then
//!
//! ```text
//! w̄  = q²(1-s) + 2q(1-q)(2 s_n + s_c) + (1-q)²
//! q' = (q²(1-s) + 2q(1-q)(s_n + s_c)) / w̄
//! ```
//!
//! With `s = 0` the mean fitness is one in every deme, but the frequency
//! still moves whenever `c > 0` because conversion is independent of the
//! fitness cost.

use serde::{Deserialize, Serialize};

use super::GenerationPhase;
use crate::base::{AlleleState, Genotype};

/// Selection with gene conversion and partial dominance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveSelection {
    /// Fitness cost of the drive homozygote
    pub s: f64,
    /// Conversion rate in heterozygotes
    pub c: f64,
    /// Dominance of the fitness cost
    pub h: f64,
}

impl DriveSelection {
    /// Create a selection model. Ranges are checked by
    /// [`ModelParameters::new`](crate::simulation::ModelParameters::new).
    pub const fn new(s: f64, c: f64, h: f64) -> Self {
        Self { s, c, h }
    }

    /// Drive transmission weight of non-converted heterozygotes, `s_n`.
    #[inline]
    pub fn non_converted(&self) -> f64 {
        0.5 * (1.0 - self.c) * (1.0 - self.h * self.s)
    }

    /// Drive transmission weight of converted heterozygotes, `s_c`.
    #[inline]
    pub fn converted(&self) -> f64 {
        self.c * (1.0 - self.s)
    }

    /// Relative weight of a genotype in the mean fitness.
    ///
    /// The heterozygote weight `2 s_n + s_c` mixes the viability of converted
    /// and non-converted carriers.
    pub fn genotype_weight(&self, genotype: Genotype) -> f64 {
        match genotype {
            Genotype::DriveHomozygote => 1.0 - self.s,
            Genotype::Heterozygote => 2.0 * self.non_converted() + self.converted(),
            Genotype::WildType => 1.0,
        }
    }

    /// Mean population fitness for drive frequency `q`.
    #[inline]
    pub fn mean_fitness(&self, q: f64) -> f64 {
        let s = self.s;
        let s_n = self.non_converted();
        let s_c = self.converted();
        q * q * (1.0 - s) + 2.0 * q * (1.0 - q) * (2.0 * s_n + s_c) + (1.0 - q) * (1.0 - q)
    }

    /// Next-generation drive frequency in a single deme.
    #[inline]
    pub fn apply_deme(&self, q: f64) -> f64 {
        let s = self.s;
        let s_n = self.non_converted();
        let s_c = self.converted();
        let mean_fitness = self.mean_fitness(q);
        (q * q * (1.0 - s) + 2.0 * q * (1.0 - q) * (s_n + s_c)) / mean_fitness
    }

    /// True if this phase leaves every frequency unchanged (no cost, no
    /// conversion).
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.s == 0.0 && self.c == 0.0
    }
}

impl GenerationPhase for DriveSelection {
    #[inline]
    fn apply(&self, state: AlleleState) -> AlleleState {
        AlleleState::new_unchecked(self.apply_deme(state.q1), self.apply_deme(state.q2))
    }
}

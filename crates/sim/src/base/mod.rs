//! Base types for the two-deme model.
//!
//! This module provides the foundational value types shared by the
//! recurrence, the runner and the display sampler: the per-deme allele
//! frequency pair and the diploid genotype classes.

mod genotype;
mod state;

pub use genotype::{hardy_weinberg, Genotype, GenotypeCounts};
pub use state::{AlleleState, Deme};

//! # Simulation Crate
//!
//! The `sim` crate provides the deterministic two-deme gene drive model.
//! It includes the base state types, the migration and selection operators,
//! the per-generation recurrence, trajectory runs to convergence, and the
//! bisection search for the critical migration threshold.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod prelude;
pub mod simulation;

pub use base::{AlleleState, Deme};

//! Batch analysis tools for the two-deme gene drive model
//!
//! This module provides:
//! - Outcome classification of final states
//! - Initial-condition scans for a fixed parameter set
//! - Alpha comparisons of trajectories under asymmetric migration
//! - Critical migration thresholds over a parameter grid (parallel)
//! - Reference parameter presets

pub mod outcome;
pub mod presets;
pub mod scan;
pub mod sweep;

// Re-export commonly used items
pub use outcome::{Outcome, DEFAULT_OUTCOME_TOLERANCE};
pub use presets::Preset;
pub use scan::{scan_initial_conditions, ScanRow};
pub use sweep::{
    compare_alpha, critical_grid, AlphaTrajectory, GridConfig, GridRow, DEFAULT_ALPHAS,
    DEFAULT_ALPHA_INITIAL, DEFAULT_ALPHA_WINDOW,
};

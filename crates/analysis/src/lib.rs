//! # Analysis Crate
//!
//! Batch analyses built on `demedrive-sim`: initial-condition scans, alpha
//! comparisons, critical-threshold grids and outcome classification.

pub mod analysis;

pub use analysis::{
    compare_alpha, critical_grid, scan_initial_conditions, AlphaTrajectory, GridConfig, GridRow,
    Outcome, Preset, ScanRow,
};

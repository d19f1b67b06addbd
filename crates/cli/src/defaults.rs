//! Shared default values for command line arguments.
//! Model defaults live in `demedrive_sim`; these cover CLI-only settings.

pub const CONFIG_FILE: &str = "demedrive.json";

pub const ALPHA_WINDOW: usize = demedrive_analysis::analysis::DEFAULT_ALPHA_WINDOW;
pub const ALPHA_INITIAL_Q1: f64 = 0.7;
pub const ALPHA_INITIAL_Q2: f64 = 0.001;

pub const GRID_S: &str = "0.5";
pub const GRID_C: &str = "0.6";
pub const GRID_H: &str = "0.3";
pub const GRID_ALPHA: &str = "1.0";

/// Rows printed per scan before output is truncated
pub const MAX_PRINTED_ROWS: usize = 50;

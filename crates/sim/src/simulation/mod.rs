//! Recurrence, trajectory runs and everything built on them.
//!
//! Re-exports
//!
//! The most commonly used types are re-exported here so consumers can import
//! them from `demedrive_sim::simulation`.
//!
//! - `step`: advance both demes by one generation (migration then selection).
//! - `TrajectoryRunner` / `run`: iterate the recurrence to convergence or
//!   budget exhaustion.
//! - `CriticalSearch`: bisection for the critical migration threshold.
//! - `Session`: one-generation-per-tick state for interactive front ends.
//! - `GenotypeSampler`: finite genotype samples for display.
//! - `Configuration`: JSON-backed settings for batch runs.

pub mod configs;
pub mod critical;
pub mod parameters;
pub mod recurrence;
pub mod runner;
pub mod sampling;
pub mod session;
pub mod trajectory;

pub use configs::{Configuration, SamplingConfig};
pub use critical::{
    find_critical_migration, probe, CriticalMigration, CriticalSearch, MonotonicityReport, Probe,
    DEFAULT_SEARCH_INITIAL,
};
pub use parameters::{
    ModelParameters, ModelParametersBuilder, RunConfig, SearchConfig,
    DEFAULT_CONVERGENCE_THRESHOLD, DEFAULT_MAX_GENERATIONS, DEFAULT_PRECISION,
    DEFAULT_SEARCH_INTERVAL,
};
pub use recurrence::{step, step_checked, step_frequencies};
pub use runner::{run, run_frequencies, TrajectoryRunner};
pub use sampling::{migrant_count, DemeSample, GenotypeSampler, DEFAULT_INDIVIDUALS};
pub use session::{
    Session, TickOutcome, DEFAULT_HISTORY_WINDOW, DEFAULT_SESSION_STATE, DEFAULT_SETTLE_THRESHOLD,
};
pub use trajectory::{ConvergenceResult, Termination, Trajectory};

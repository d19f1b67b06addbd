//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use demedrive_sim::prelude::*;
//!
//! let params = ModelParameters::default();
//! let next = step(AlleleState::new(0.7, 0.1).unwrap(), &params);
//! assert!(next.is_finite());
//! ```

pub use crate::base::{AlleleState, Deme, Genotype, GenotypeCounts};
pub use crate::errors::{ParameterError, SimulationError, StateError};
pub use crate::evolution::{DriveSelection, GenerationPhase, MigrationModel};
pub use crate::simulation::{
    run, step, ConvergenceResult, CriticalSearch, ModelParameters, RunConfig, SearchConfig,
    Session, TickOutcome, Trajectory, TrajectoryRunner,
};

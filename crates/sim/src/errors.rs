use thiserror::Error;

/// Errors returned when constructing [`ModelParameters`](crate::simulation::ModelParameters).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// A coefficient was NaN or infinite.
    #[error("Parameter {name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    /// A coefficient fell outside its documented range.
    #[error("Parameter {name} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// One of the migration denominators evaluates to zero.
    #[error("Degenerate migration: {denominator} = 0 for m = {m}, alpha = {alpha}")]
    DegenerateMigration {
        denominator: &'static str,
        m: f64,
        alpha: f64,
    },
}

/// Error returned when an allele frequency is not a finite value in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid allele frequency for {deme}: {value} (must be between 0.0 and 1.0)")]
pub struct StateError {
    /// Which deme the frequency belongs to
    pub deme: crate::base::Deme,
    /// The rejected value
    pub value: f64,
}

/// Errors in run or search settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RunConfigError {
    #[error("Generation budget must be positive")]
    ZeroGenerations,
    #[error("Convergence threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),
    #[error("Search precision must be positive and finite, got {0}")]
    InvalidPrecision(f64),
    #[error("Invalid search interval [{low}, {high}]")]
    InvalidInterval { low: f64, high: f64 },
}

/// Errors that can occur while running a trajectory or a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    RunConfig(#[from] RunConfigError),
    /// The recurrence produced NaN or infinity (zero mean fitness).
    #[error("Recurrence produced a non-finite frequency at generation {generation}")]
    NonFinite { generation: usize },
    #[error("Trajectory must hold at least the initial state")]
    EmptyTrajectory,
}

/// Errors drawing display genotypes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("Cannot sample from allele frequency {0}")]
    InvalidFrequency(f64),
    #[error("Cannot exchange {migrants} migrants between demes of {individuals}")]
    TooManyMigrants { migrants: usize, individuals: usize },
    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Errors loading or validating a [`Configuration`](crate::simulation::Configuration).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(#[from] SimulationError),
}

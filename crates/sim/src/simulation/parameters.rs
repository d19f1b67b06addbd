//! Model parameters and run settings.
//!
//! This module provides the immutable coefficient set of the two-deme model
//! and the settings that control how long trajectories run and how finely the
//! critical migration search resolves.

use serde::{Deserialize, Serialize};

use crate::errors::{ParameterError, RunConfigError};
use crate::evolution::{DriveSelection, MigrationModel};

/// Default generation budget for a trajectory.
pub const DEFAULT_MAX_GENERATIONS: usize = 10_000;
/// Default per-deme change below which a trajectory is considered converged.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-10;
/// Default bracket width at which the critical migration search stops.
pub const DEFAULT_PRECISION: f64 = 0.001;
/// Migration rates searched for the critical threshold.
pub const DEFAULT_SEARCH_INTERVAL: (f64, f64) = (0.0, 0.5);

/// Coefficients of the two-deme gene drive model.
///
/// Parameters are fixed for the duration of a trajectory. Build them with
/// [`ModelParameters::new`] or [`ModelParameters::builder`] to get range
/// validation; [`ModelParameters::new_unchecked`] is available for callers
/// that deliberately explore outside the documented domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Selection cost of the drive homozygote, in [0, 1]
    pub s: f64,
    /// Conversion rate, in [0, 1]
    pub c: f64,
    /// Dominance of the cost, in [0, 1]
    pub h: f64,
    /// Baseline migration rate (non-target -> target)
    pub m: f64,
    /// Migration asymmetry; reverse migration is `alpha * m`
    pub alpha: f64,
}

impl Default for ModelParameters {
    /// Defaults of the interactive front end: `s=0.5, c=0.8, h=0.3, m=0.05, alpha=1`.
    fn default() -> Self {
        Self::new_unchecked(0.5, 0.8, 0.3, 0.05, 1.0)
    }
}

impl ModelParameters {
    /// Create validated parameters.
    ///
    /// # Errors
    /// - `s`, `c`, `h` must lie in [0, 1]
    /// - `m` and `alpha * m` must lie in [0, 1] so migration weights stay non-negative
    /// - `alpha` must be non-negative
    /// - neither migration denominator may be zero
    pub fn new(s: f64, c: f64, h: f64, m: f64, alpha: f64) -> Result<Self, ParameterError> {
        let params = Self::new_unchecked(s, c, h, m, alpha);
        params.validate()?;
        Ok(params)
    }

    /// Create parameters without any checks.
    pub const fn new_unchecked(s: f64, c: f64, h: f64, m: f64, alpha: f64) -> Self {
        Self { s, c, h, m, alpha }
    }

    /// Start a builder seeded with [`ModelParameters::default`].
    pub fn builder() -> ModelParametersBuilder {
        ModelParametersBuilder::new()
    }

    /// Validate all coefficients.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, value) in [
            ("s", self.s),
            ("c", self.c),
            ("h", self.h),
            ("m", self.m),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }

        check_range("s", self.s, 0.0, 1.0)?;
        check_range("c", self.c, 0.0, 1.0)?;
        check_range("h", self.h, 0.0, 1.0)?;
        check_range("m", self.m, 0.0, 1.0)?;
        check_range("alpha", self.alpha, 0.0, f64::MAX)?;
        check_range("alpha * m", self.alpha * self.m, 0.0, 1.0)?;

        let migration = self.migration();
        if migration.target_denominator() == 0.0 {
            return Err(ParameterError::DegenerateMigration {
                denominator: "1 - alpha*m + m",
                m: self.m,
                alpha: self.alpha,
            });
        }
        if migration.non_target_denominator() == 0.0 {
            return Err(ParameterError::DegenerateMigration {
                denominator: "1 - m + alpha*m",
                m: self.m,
                alpha: self.alpha,
            });
        }
        Ok(())
    }

    /// Copy with a different baseline migration rate.
    pub fn with_migration(self, m: f64) -> Result<Self, ParameterError> {
        Self::new(self.s, self.c, self.h, m, self.alpha)
    }

    /// Copy with a different migration asymmetry.
    pub fn with_alpha(self, alpha: f64) -> Result<Self, ParameterError> {
        Self::new(self.s, self.c, self.h, self.m, alpha)
    }

    /// The migration phase described by these parameters.
    #[inline]
    pub fn migration(&self) -> MigrationModel {
        MigrationModel::new(self.m, self.alpha)
    }

    /// The selection phase described by these parameters.
    #[inline]
    pub fn selection(&self) -> DriveSelection {
        DriveSelection::new(self.s, self.c, self.h)
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ParameterError> {
    if value < min || value > max {
        return Err(ParameterError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Fluent builder for [`ModelParameters`].
///
/// # Examples
///
/// ```
/// use demedrive_sim::simulation::ModelParameters;
///
/// let params = ModelParameters::builder()
///     .selection(0.5)
///     .conversion(0.6)
///     .dominance(0.3)
///     .migration(0.02)
///     .build()
///     .unwrap();
/// assert_eq!(params.alpha, 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ModelParametersBuilder {
    params: ModelParameters,
}

impl Default for ModelParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelParametersBuilder {
    /// Create a builder starting from the default parameters.
    pub fn new() -> Self {
        Self {
            params: ModelParameters::default(),
        }
    }

    /// Set the selection cost `s`.
    pub fn selection(mut self, s: f64) -> Self {
        self.params.s = s;
        self
    }

    /// Set the conversion rate `c`.
    pub fn conversion(mut self, c: f64) -> Self {
        self.params.c = c;
        self
    }

    /// Set the dominance `h`.
    pub fn dominance(mut self, h: f64) -> Self {
        self.params.h = h;
        self
    }

    /// Set the baseline migration rate `m`.
    pub fn migration(mut self, m: f64) -> Self {
        self.params.m = m;
        self
    }

    /// Set the migration asymmetry `alpha`.
    pub fn asymmetry(mut self, alpha: f64) -> Self {
        self.params.alpha = alpha;
        self
    }

    /// Validate and return the parameters.
    pub fn build(self) -> Result<ModelParameters, ParameterError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Generation budget and convergence test for a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Maximum number of generations to simulate
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Per-deme change below which the run stops
    #[serde(default = "default_convergence_threshold")]
    pub convergence_threshold: f64,
}

fn default_max_generations() -> usize {
    DEFAULT_MAX_GENERATIONS
}

fn default_convergence_threshold() -> f64 {
    DEFAULT_CONVERGENCE_THRESHOLD
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_generations: DEFAULT_MAX_GENERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
        }
    }
}

impl RunConfig {
    /// Create a validated run configuration.
    pub fn new(max_generations: usize, convergence_threshold: f64) -> Result<Self, RunConfigError> {
        let config = Self {
            max_generations,
            convergence_threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the budget is positive and the threshold positive and finite.
    pub fn validate(&self) -> Result<(), RunConfigError> {
        if self.max_generations == 0 {
            return Err(RunConfigError::ZeroGenerations);
        }
        if !(self.convergence_threshold.is_finite() && self.convergence_threshold > 0.0) {
            return Err(RunConfigError::InvalidThreshold(self.convergence_threshold));
        }
        Ok(())
    }
}

/// Settings of the critical migration bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Bracket width at which bisection stops
    #[serde(default = "default_precision")]
    pub precision: f64,
    /// Lower end of the searched migration interval
    #[serde(default = "default_low")]
    pub m_low: f64,
    /// Upper end of the searched migration interval
    #[serde(default = "default_high")]
    pub m_high: f64,
    /// If set, probe the predicate on this many evenly spaced rates after
    /// the search to look for non-monotonic behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monotonicity_samples: Option<usize>,
    /// Settings of each trajectory run during the search. Not serialized;
    /// a [`Configuration`](crate::simulation::Configuration) fills it from
    /// its execution section.
    #[serde(skip)]
    pub run: RunConfig,
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

fn default_low() -> f64 {
    DEFAULT_SEARCH_INTERVAL.0
}

fn default_high() -> f64 {
    DEFAULT_SEARCH_INTERVAL.1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            m_low: DEFAULT_SEARCH_INTERVAL.0,
            m_high: DEFAULT_SEARCH_INTERVAL.1,
            monotonicity_samples: None,
            run: RunConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Default search with a custom precision.
    pub fn with_precision(precision: f64) -> Result<Self, RunConfigError> {
        let config = Self {
            precision,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check precision, interval and the nested run settings.
    pub fn validate(&self) -> Result<(), RunConfigError> {
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(RunConfigError::InvalidPrecision(self.precision));
        }
        if !(self.m_low.is_finite() && self.m_high.is_finite())
            || self.m_low < 0.0
            || self.m_high > 1.0
            || self.m_low >= self.m_high
        {
            return Err(RunConfigError::InvalidInterval {
                low: self.m_low,
                high: self.m_high,
            });
        }
        self.run.validate()
    }

    /// Upper bound on the number of bisection iterations:
    /// `ceil(log2((m_high - m_low) / precision))`, or zero if the interval
    /// is already narrower than the precision.
    pub fn max_iterations(&self) -> usize {
        let ratio = (self.m_high - self.m_low) / self.precision;
        if ratio <= 1.0 {
            0
        } else {
            ratio.log2().ceil() as usize
        }
    }
}

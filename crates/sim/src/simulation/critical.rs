//! Critical migration threshold search.
//!
//! The critical threshold `m*` is the largest baseline migration rate at which
//! a trajectory started from a given state still ends in differential
//! targeting (`0 < q2 < q1 < 1`). It is located by bisection over the search
//! interval, running one full trajectory per probe.
//!
//! Bisection assumes the predicate is monotone non-increasing in `m`: true
//! below `m*` and false above it. This is a precondition on the parameter
//! domain and is not verified by the search itself. When the predicate is
//! not monotone the search still terminates and returns whatever bracket it
//! converged to. [`CriticalSearch::monotonicity`] can scan the interval
//! afterwards and report rates that contradict the estimate.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::base::AlleleState;
use crate::errors::SimulationError;
use crate::simulation::{run, ModelParameters, RunConfig, SearchConfig};

/// Default initial state for the search: drive common in the target deme,
/// rare in the non-target deme.
pub const DEFAULT_SEARCH_INITIAL: AlleleState = AlleleState::new_unchecked(0.7, 0.1);

/// Preallocated probe slots; longer searches grow the vector.
const PROBE_CAPACITY: usize = 64;

/// One trajectory evaluated during the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    /// Migration rate tested
    pub m: f64,
    /// Final state of the trajectory
    pub final_state: AlleleState,
    /// Generations the trajectory ran for
    pub generations: usize,
    /// Whether the final state shows differential targeting
    pub differential_targeting: bool,
}

/// Result of a critical migration search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalMigration {
    /// Estimated threshold (lower end of the final bracket)
    pub m_star: f64,
    /// Upper end of the final bracket
    pub m_high: f64,
    /// Number of bisection iterations performed
    pub iterations: usize,
    /// Every probe in evaluation order
    pub probes: Vec<Probe>,
}

impl CriticalMigration {
    /// Width of the final bracket.
    pub fn bracket_width(&self) -> f64 {
        self.m_high - self.m_star
    }
}

/// Outcome of scanning the search interval for non-monotonic behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonotonicityReport {
    /// Predicate evaluated on an even grid over the search interval
    pub samples: Vec<Probe>,
    /// Rates where the predicate disagrees with the estimate: true above
    /// `m* + precision`, or false below `m*`
    pub violations: Vec<f64>,
}

impl MonotonicityReport {
    /// True when no sample contradicts the estimate.
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Bisection search for the critical migration threshold.
///
/// # Examples
///
/// ```
/// use demedrive_sim::simulation::CriticalSearch;
///
/// let search = CriticalSearch::new(0.5, 0.6, 0.3).unwrap();
/// let result = search.run();
/// assert!((0.0..=0.5).contains(&result.m_star));
/// assert!(result.bracket_width() <= 0.001);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CriticalSearch {
    params: ModelParameters,
    initial: AlleleState,
    config: SearchConfig,
}

impl CriticalSearch {
    /// Search with `alpha = 1`, initial state `(0.7, 0.1)` and the default
    /// [`SearchConfig`].
    pub fn new(s: f64, c: f64, h: f64) -> Result<Self, SimulationError> {
        let params = ModelParameters::new(s, c, h, 0.0, 1.0)?;
        Self::with_config(params, DEFAULT_SEARCH_INITIAL, SearchConfig::default())
    }

    /// Search with explicit settings. The `m` field of `params` is ignored.
    ///
    /// # Errors
    /// Returns an error if the selection coefficients, `alpha`, the initial
    /// state or the search settings are invalid, or if `alpha * m` would
    /// leave [0, 1] anywhere in the search interval.
    pub fn with_config(
        params: ModelParameters,
        initial: AlleleState,
        config: SearchConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        initial.validate()?;
        params.with_migration(config.m_low)?;
        params.with_migration(config.m_high)?;
        Ok(Self {
            params,
            initial,
            config,
        })
    }

    /// Settings of this search.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Initial state every probe starts from.
    pub fn initial(&self) -> AlleleState {
        self.initial
    }

    /// Run one trajectory at migration rate `m`.
    pub fn probe(&self, m: f64) -> Probe {
        probe(&self.params, m, self.initial, &self.config.run)
    }

    /// Run the bisection.
    ///
    /// Stops once the bracket is no wider than the precision, after
    /// [`SearchConfig::max_iterations`] probes, or when the midpoint no longer
    /// falls strictly inside the bracket.
    pub fn run(&self) -> CriticalMigration {
        let mut m_low = self.config.m_low;
        let mut m_high = self.config.m_high;
        let mut iterations = 0;
        let max_iterations = self.config.max_iterations();
        let mut probes = Vec::with_capacity(max_iterations.min(PROBE_CAPACITY));

        while m_high - m_low > self.config.precision && iterations < max_iterations {
            let m_mid = (m_low + m_high) / 2.0;
            // Bracket narrower than the float spacing
            if m_mid <= m_low || m_mid >= m_high {
                break;
            }
            let probe = self.probe(m_mid);
            if probe.differential_targeting {
                m_low = m_mid;
            } else {
                m_high = m_mid;
            }
            iterations += 1;
            trace!(
                iteration = iterations,
                m = m_mid,
                differential_targeting = probe.differential_targeting,
                m_low,
                m_high,
                "bisection step"
            );
            probes.push(probe);
        }

        debug!(m_star = m_low, m_high, iterations, "critical migration search finished");
        CriticalMigration {
            m_star: m_low,
            m_high,
            iterations,
            probes,
        }
    }

    /// Evaluate the predicate at `samples` evenly spaced rates over the
    /// search interval and compare against `estimate`.
    ///
    /// Logs a warning when any sample contradicts the estimate. The estimate
    /// itself is left untouched.
    pub fn monotonicity(&self, estimate: &CriticalMigration, samples: usize) -> MonotonicityReport {
        let samples = samples.max(2);
        let low = self.config.m_low;
        let span = self.config.m_high - low;

        let probes: Vec<Probe> = (0..samples)
            .map(|i| self.probe(low + span * i as f64 / (samples - 1) as f64))
            .collect();

        let violations: Vec<f64> = probes
            .iter()
            .filter(|p| {
                let above = p.m > estimate.m_star + self.config.precision;
                let below = p.m < estimate.m_star;
                (above && p.differential_targeting) || (below && !p.differential_targeting)
            })
            .map(|p| p.m)
            .collect();

        if !violations.is_empty() {
            warn!(
                m_star = estimate.m_star,
                violations = violations.len(),
                first = violations[0],
                "differential targeting is not monotone in m; the bisection estimate may be unreliable"
            );
        }

        MonotonicityReport {
            samples: probes,
            violations,
        }
    }
}

/// Run one trajectory at migration rate `m` with the remaining coefficients
/// from `params`, and evaluate the differential targeting predicate on its
/// final state.
pub fn probe(params: &ModelParameters, m: f64, initial: AlleleState, config: &RunConfig) -> Probe {
    let params = ModelParameters::new_unchecked(params.s, params.c, params.h, m, params.alpha);
    let result = run(&params, initial, config);
    Probe {
        m,
        final_state: result.final_state,
        generations: result.generations,
        differential_targeting: result.final_state.has_differential_targeting(),
    }
}

/// Scalar form of the search:
/// `(s, c, h, alpha, q1_0, q2_0, precision) -> m*`.
///
/// No validation is performed; the search interval is `[0, 0.5]` and every
/// probe uses the default run settings.
pub fn find_critical_migration(
    s: f64,
    c: f64,
    h: f64,
    alpha: f64,
    q1_0: f64,
    q2_0: f64,
    precision: f64,
) -> f64 {
    let search = CriticalSearch {
        params: ModelParameters::new_unchecked(s, c, h, 0.0, alpha),
        initial: AlleleState::new_unchecked(q1_0, q2_0),
        config: SearchConfig {
            precision,
            ..SearchConfig::default()
        },
    };
    search.run().m_star
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::StateError;

/// One of the two connected subpopulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Deme {
    /// Deme 1, where the drive is meant to spread.
    Target,
    /// Deme 2, where the drive should stay rare.
    NonTarget,
}

impl Deme {
    /// Both demes in index order (deme 1 first).
    pub const ALL: [Deme; 2] = [Deme::Target, Deme::NonTarget];

    /// One-based deme number as used in the literature.
    #[inline]
    pub const fn number(self) -> u8 {
        match self {
            Self::Target => 1,
            Self::NonTarget => 2,
        }
    }
}

impl fmt::Display for Deme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target deme"),
            Self::NonTarget => write!(f, "non-target deme"),
        }
    }
}

/// Drive allele frequencies in both demes for a single generation.
///
/// `q1` is the frequency in the target deme, `q2` in the non-target deme.
/// Values built through [`AlleleState::new`] are guaranteed to be finite and
/// within [0.0, 1.0]; [`AlleleState::new_unchecked`] skips validation and is
/// what the recurrence itself produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlleleState {
    /// Frequency in the target deme
    pub q1: f64,
    /// Frequency in the non-target deme
    pub q2: f64,
}

impl AlleleState {
    /// Both demes free of the drive allele.
    pub const LOST: Self = Self::new_unchecked(0.0, 0.0);

    /// Drive allele fixed in both demes.
    pub const FIXED: Self = Self::new_unchecked(1.0, 1.0);

    /// Create a validated state.
    pub fn new(q1: f64, q2: f64) -> Result<Self, StateError> {
        let state = Self::new_unchecked(q1, q2);
        state.validate()?;
        Ok(state)
    }

    /// Create a state without range checks.
    #[inline]
    pub const fn new_unchecked(q1: f64, q2: f64) -> Self {
        Self { q1, q2 }
    }

    /// Check that both frequencies are finite and within [0, 1].
    pub fn validate(&self) -> Result<(), StateError> {
        for deme in Deme::ALL {
            let value = self.get(deme);
            if !(0.0..=1.0).contains(&value) {
                return Err(StateError { deme, value });
            }
        }
        Ok(())
    }

    /// Frequency in the given deme.
    #[inline]
    pub fn get(&self, deme: Deme) -> f64 {
        match deme {
            Deme::Target => self.q1,
            Deme::NonTarget => self.q2,
        }
    }

    /// Returns true if neither frequency is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.q1.is_finite() && self.q2.is_finite()
    }

    /// Per-deme absolute change from `previous` to `self`.
    #[inline]
    pub fn delta(&self, previous: &Self) -> (f64, f64) {
        ((self.q1 - previous.q1).abs(), (self.q2 - previous.q2).abs())
    }

    /// True when both per-deme changes are strictly below `threshold`.
    #[inline]
    pub fn is_within(&self, previous: &Self, threshold: f64) -> bool {
        let (d1, d2) = self.delta(previous);
        d1 < threshold && d2 < threshold
    }

    /// Differential targeting: `0 < q2 < q1 < 1`.
    ///
    /// The target deme's frequency strictly exceeds the non-target deme's and
    /// neither deme has reached a fixed boundary.
    #[inline]
    pub fn has_differential_targeting(&self) -> bool {
        0.0 < self.q2 && self.q2 < self.q1 && self.q1 < 1.0
    }

    /// Flat tuple view, target deme first.
    #[inline]
    pub const fn as_tuple(&self) -> (f64, f64) {
        (self.q1, self.q2)
    }
}

impl From<(f64, f64)> for AlleleState {
    fn from((q1, q2): (f64, f64)) -> Self {
        Self::new_unchecked(q1, q2)
    }
}

impl From<AlleleState> for (f64, f64) {
    fn from(state: AlleleState) -> Self {
        state.as_tuple()
    }
}

impl fmt::Display for AlleleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(q1={:.6}, q2={:.6})", self.q1, self.q2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(AlleleState::new(0.0, 1.0).is_ok());
        assert!(AlleleState::new(1.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = AlleleState::new(1.2, 0.5).unwrap_err();
        assert_eq!(err.deme, Deme::Target);

        let err = AlleleState::new(0.5, -0.01).unwrap_err();
        assert_eq!(err.deme, Deme::NonTarget);
    }

    #[test]
    fn test_new_rejects_nan() {
        assert!(AlleleState::new(f64::NAN, 0.5).is_err());
        assert!(AlleleState::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_differential_targeting_predicate() {
        assert!(AlleleState::new_unchecked(0.9, 0.1).has_differential_targeting());
        // Equal frequencies are not differential
        assert!(!AlleleState::new_unchecked(0.5, 0.5).has_differential_targeting());
        // Fixed or lost boundaries never count
        assert!(!AlleleState::new_unchecked(1.0, 0.1).has_differential_targeting());
        assert!(!AlleleState::new_unchecked(0.9, 0.0).has_differential_targeting());
        // Wrong ordering
        assert!(!AlleleState::new_unchecked(0.1, 0.9).has_differential_targeting());
    }

    #[test]
    fn test_is_within_is_strict() {
        let a = AlleleState::new_unchecked(0.5, 0.5);
        let b = AlleleState::new_unchecked(0.5 + 1e-3, 0.5);
        assert!(b.is_within(&a, 1e-2));
        assert!(!b.is_within(&a, 1e-4));
        assert!(!a.is_within(&a, 0.0));
    }

    #[test]
    fn test_deme_number_and_get() {
        let state = AlleleState::new_unchecked(0.7, 0.1);
        assert_eq!(Deme::Target.number(), 1);
        assert_eq!(Deme::NonTarget.number(), 2);
        assert_eq!(state.get(Deme::Target), 0.7);
        assert_eq!(state.get(Deme::NonTarget), 0.1);
    }

    #[test]
    fn test_tuple_conversions() {
        let state: AlleleState = (0.3, 0.2).into();
        let (q1, q2): (f64, f64) = state.into();
        assert_eq!((q1, q2), (0.3, 0.2));
    }
}

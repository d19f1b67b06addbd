//! Published reference configurations.
//!
//! Each preset carries the selection coefficients of a drive design together
//! with the migration rate, asymmetry and starting states it is usually
//! studied at.

use std::str::FromStr;

use demedrive_sim::base::AlleleState;
use demedrive_sim::errors::ParameterError;
use demedrive_sim::simulation::ModelParameters;
use serde::Serialize;

/// A named parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub s: f64,
    pub c: f64,
    pub h: f64,
    /// Migration rate the preset is usually run at
    pub m: f64,
    pub alpha: f64,
    /// Starting states for an initial-condition scan
    pub initials: &'static [(f64, f64)],
}

impl Preset {
    /// Partial conversion with a moderate, partially recessive cost.
    pub const B2: Preset = Preset {
        name: "b2",
        description: "B2 configuration (s=0.5, c=0.6, h=0.3)",
        s: 0.5,
        c: 0.6,
        h: 0.3,
        m: 0.02,
        alpha: 1.0,
        initials: &[(0.001, 0.01), (0.5, 0.3), (0.9, 0.1)],
    };

    /// Full conversion, as in malaria vector drives.
    pub const MALARIA: Preset = Preset {
        name: "malaria",
        description: "Malaria vector drive with full conversion (s=0.73, c=1.0, h=0.5)",
        s: 0.73,
        c: 1.0,
        h: 0.5,
        m: 0.09,
        alpha: 1.0,
        initials: &[(0.65, 0.1), (0.8, 0.2)],
    };

    /// Dominant cost with lower conversion, as in rodent drives.
    pub const RODENT: Preset = Preset {
        name: "rodent",
        description: "Dominant rodent drive (s=0.6, c=0.72, h=1.0)",
        s: 0.6,
        c: 0.72,
        h: 1.0,
        m: 0.07,
        alpha: 1.0,
        initials: &[(0.7, 0.1), (0.8, 0.2)],
    };

    pub const ALL: [Preset; 3] = [Self::B2, Self::MALARIA, Self::RODENT];

    /// Look up a preset by name, ignoring case.
    pub fn by_name(name: &str) -> Option<Preset> {
        Self::ALL
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Validated model parameters of this preset.
    pub fn params(&self) -> Result<ModelParameters, ParameterError> {
        ModelParameters::new(self.s, self.c, self.h, self.m, self.alpha)
    }

    /// The same preset with a different migration rate and asymmetry.
    pub fn with_migration(self, m: f64, alpha: f64) -> Self {
        Self { m, alpha, ..self }
    }

    /// Scan starting states.
    pub fn initial_states(&self) -> Vec<AlleleState> {
        self.initials.iter().copied().map(AlleleState::from).collect()
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::by_name(s).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|p| p.name).collect();
            format!("Unknown preset '{s}' (expected one of: {})", names.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in Preset::ALL {
            assert!(preset.params().is_ok(), "{}", preset.name);
            assert!(!preset.initial_states().is_empty());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Preset::by_name("B2"), Some(Preset::B2));
        assert_eq!("rodent".parse::<Preset>().unwrap().h, 1.0);
        let err = "mouse".parse::<Preset>().unwrap_err();
        assert!(err.contains("b2, malaria, rodent"));
    }

    #[test]
    fn test_with_migration() {
        let asym = Preset::RODENT.with_migration(0.08, 0.1);
        assert_eq!(asym.alpha, 0.1);
        assert_eq!(asym.c, 0.72);
        assert_eq!(asym.params().unwrap().m, 0.08);
    }
}

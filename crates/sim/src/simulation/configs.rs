//! File-backed configuration.
//!
//! A [`Configuration`] bundles every setting a batch run needs and can be
//! stored as JSON to reproduce it later. Every section has defaults, so a
//! file only needs the fields it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::base::AlleleState;
use crate::errors::{ConfigError, SimulationError};
use crate::simulation::sampling::DEFAULT_INDIVIDUALS;
use crate::simulation::{ModelParameters, RunConfig, SearchConfig};

/// The master configuration struct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Model coefficients
    #[serde(default)]
    pub model: ModelParameters,
    /// Starting frequencies
    #[serde(default = "default_initial")]
    pub initial: AlleleState,
    /// Generation budget and convergence test
    #[serde(default)]
    pub execution: RunConfig,
    /// Critical migration search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Display sampling settings
    #[serde(default)]
    pub sampling: SamplingConfig,
}

fn default_initial() -> AlleleState {
    AlleleState::new_unchecked(0.7, 0.1)
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            model: ModelParameters::default(),
            initial: default_initial(),
            execution: RunConfig::default(),
            search: SearchConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

/// Display sampling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Individuals drawn per deme
    #[serde(default = "default_individuals")]
    pub individuals: usize,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_individuals() -> usize {
    DEFAULT_INDIVIDUALS
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            individuals: DEFAULT_INDIVIDUALS,
            seed: None,
        }
    }
}

impl Configuration {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.model.validate()?;
        self.initial.validate()?;
        self.execution.validate()?;
        self.search_config().validate()?;
        Ok(())
    }

    /// Search settings with the execution section applied to every probe.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            run: self.execution,
            ..self.search
        }
    }
}

use clap::{Args, ValueEnum};
use demedrive_analysis::analysis::Preset;
use demedrive_sim::simulation::Configuration;

/// Selection coefficients of the drive.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Selection cost of the drive homozygote (0-1)
    #[arg(short = 's', long = "selection")]
    pub s: Option<f64>,

    /// Conversion rate in heterozygotes (0-1)
    #[arg(short = 'c', long = "conversion")]
    pub c: Option<f64>,

    /// Dominance of the selection cost (0-1)
    #[arg(long = "dominance")]
    pub h: Option<f64>,
}

/// Full model: selection plus migration.
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Baseline migration rate, non-target -> target (0-1)
    #[arg(short = 'm', long = "migration")]
    pub m: Option<f64>,

    /// Migration asymmetry; target -> non-target migration is alpha * m
    #[arg(long)]
    pub alpha: Option<f64>,
}

/// Starting frequencies.
#[derive(Args, Debug, Clone, Default)]
pub struct InitialArgs {
    /// Initial drive frequency in the target deme
    #[arg(long)]
    pub q1: Option<f64>,

    /// Initial drive frequency in the non-target deme
    #[arg(long)]
    pub q2: Option<f64>,
}

/// Generation budget and convergence test.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Maximum number of generations per trajectory
    #[arg(long)]
    pub max_generations: Option<usize>,

    /// Per-deme change below which a trajectory is considered converged
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Output file format for histories and tables.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl SelectionArgs {
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(s) = self.s {
            config.model.s = s;
        }
        if let Some(c) = self.c {
            config.model.c = c;
        }
        if let Some(h) = self.h {
            config.model.h = h;
        }
    }
}

impl ModelArgs {
    pub fn apply(&self, config: &mut Configuration) {
        self.selection.apply(config);
        if let Some(m) = self.m {
            config.model.m = m;
        }
        if let Some(alpha) = self.alpha {
            config.model.alpha = alpha;
        }
    }

    pub fn apply_preset(&self, config: &mut Configuration, preset: &Preset) {
        config.model.s = preset.s;
        config.model.c = preset.c;
        config.model.h = preset.h;
        config.model.m = preset.m;
        config.model.alpha = preset.alpha;
        // Explicit flags still win over the preset
        self.apply(config);
    }
}

impl InitialArgs {
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(q1) = self.q1 {
            config.initial.q1 = q1;
        }
        if let Some(q2) = self.q2 {
            config.initial.q2 = q2;
        }
    }
}

impl RunArgs {
    pub fn apply(&self, config: &mut Configuration) {
        if let Some(max_generations) = self.max_generations {
            config.execution.max_generations = max_generations;
        }
        if let Some(threshold) = self.threshold {
            config.execution.convergence_threshold = threshold;
        }
    }
}

/// Parse a `q1,q2` pair.
pub fn parse_pair(value: &str) -> Result<(f64, f64), String> {
    let (q1, q2) = value
        .split_once(',')
        .ok_or_else(|| format!("expected 'q1,q2', got '{value}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid frequency '{}': {e}", v.trim()))
    };
    Ok((parse(q1)?, parse(q2)?))
}

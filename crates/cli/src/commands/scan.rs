use anyhow::{Context, Result};
use demedrive_analysis::analysis::{scan_initial_conditions, Preset};
use demedrive_sim::base::AlleleState;
use demedrive_sim::simulation::Configuration;
use std::path::PathBuf;

use crate::args::ExportFormat;
use crate::export::write_scan;
use crate::printing::{print_model, print_scan};

pub fn scan(
    config: &Configuration,
    initials: &[(f64, f64)],
    preset: Option<&Preset>,
    output: Option<&PathBuf>,
    format: ExportFormat,
) -> Result<()> {
    println!("🧬 demedrive - Initial-Condition Scan");
    println!("============================================");
    if let Some(preset) = preset {
        println!("  • Preset: {}", preset.description);
    }
    print_model(config);

    let states: Vec<AlleleState> = if !initials.is_empty() {
        initials.iter().copied().map(AlleleState::from).collect()
    } else if let Some(preset) = preset {
        preset.initial_states()
    } else {
        vec![config.initial]
    };

    let rows = scan_initial_conditions(&config.model, &states, &config.execution)
        .context("Scan failed")?;
    print_scan(&rows);

    if let Some(path) = output {
        write_scan(path, &rows, format)?;
        println!("\n✓ Results written to: {}", path.display());
    }
    Ok(())
}

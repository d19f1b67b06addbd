use anyhow::{Context, Result};
use demedrive_analysis::analysis::compare_alpha;
use demedrive_sim::base::AlleleState;
use demedrive_sim::simulation::Configuration;
use std::path::PathBuf;

use crate::args::ExportFormat;
use crate::export::write_alpha;
use crate::printing::print_alpha;

pub fn compare(
    config: &Configuration,
    alphas: &[f64],
    initial: (f64, f64),
    window: usize,
    output: Option<&PathBuf>,
    format: ExportFormat,
) -> Result<()> {
    println!("🧬 demedrive - Alpha Comparison");
    println!("============================================");
    println!(
        "  • s={}, c={}, h={}, m={}",
        config.model.s, config.model.c, config.model.h, config.model.m
    );
    println!("  • Initial State: q1={}, q2={}", initial.0, initial.1);

    let initial = AlleleState::new(initial.0, initial.1).context("Invalid initial state")?;
    let rows = compare_alpha(&config.model, alphas, initial, &config.execution, window)
        .context("Alpha comparison failed")?;
    print_alpha(&rows);

    if let Some(path) = output {
        write_alpha(path, &rows, format)?;
        println!("\n✓ Histories written to: {}", path.display());
    }
    Ok(())
}

use anyhow::{Context, Result};
use demedrive_sim::simulation::{Configuration, TrajectoryRunner};
use std::path::PathBuf;
use tracing::info;

use crate::args::ExportFormat;
use crate::export::write_run;
use crate::printing::{print_execution, print_model, print_run_summary};

pub fn run_trajectory(
    config: &Configuration,
    output: Option<&PathBuf>,
    format: ExportFormat,
) -> Result<()> {
    println!("🧬 demedrive - Running Trajectory");
    println!("============================================");
    print_model(config);
    print_execution(config);

    let runner = TrajectoryRunner::new(config.model, config.execution)
        .context("Invalid run parameters")?;
    let result = runner
        .run(config.initial)
        .context("Trajectory failed")?;
    info!(generations = result.generations, "trajectory finished");

    print_run_summary(&result, result.termination(&config.execution));

    if let Some(path) = output {
        write_run(path, &result, format)?;
        println!("\n✓ History written to: {}", path.display());
    }
    Ok(())
}

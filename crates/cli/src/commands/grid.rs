use anyhow::{Context, Result};
use demedrive_analysis::analysis::sweep::critical_grid_with;
use demedrive_analysis::analysis::GridConfig;
use demedrive_sim::simulation::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use crate::args::ExportFormat;
use crate::export::write_grid;
use crate::printing::print_grid;

/// Values along each grid axis.
#[derive(Debug, Clone)]
pub struct GridAxes {
    pub s: Vec<f64>,
    pub c: Vec<f64>,
    pub h: Vec<f64>,
    pub alpha: Vec<f64>,
}

pub fn run_grid(
    config: &Configuration,
    axes: &GridAxes,
    output: Option<&PathBuf>,
    format: ExportFormat,
    show_progress: bool,
) -> Result<()> {
    println!("🧬 demedrive - Critical Threshold Grid");
    println!("============================================");

    let search = config.search_config();
    search.validate().context("Invalid search settings")?;
    config
        .initial
        .validate()
        .context("Invalid initial state")?;

    let configs = GridConfig::cartesian(&axes.s, &axes.c, &axes.h, &axes.alpha);
    println!(
        "  • {} configurations ({} s × {} c × {} h × {} α)",
        configs.len(),
        axes.s.len(),
        axes.c.len(),
        axes.h.len(),
        axes.alpha.len()
    );
    println!("  • Threads: {}", rayon::current_num_threads());

    let pb = if show_progress {
        let pb = ProgressBar::new(configs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let rows = critical_grid_with(&configs, config.initial, &search, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    });

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    print_grid(&rows);

    if let Some(path) = output {
        write_grid(path, &rows, format)?;
        println!("\n✓ Grid written to: {}", path.display());
    }
    Ok(())
}

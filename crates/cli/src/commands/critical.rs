use anyhow::{Context, Result};
use demedrive_sim::simulation::{Configuration, CriticalSearch};

use crate::printing::{print_critical, print_monotonicity};

pub fn find_threshold(config: &Configuration) -> Result<()> {
    println!("🧬 demedrive - Critical Migration Search");
    println!("============================================");
    println!(
        "  • s={}, c={}, h={}, α={}",
        config.model.s, config.model.c, config.model.h, config.model.alpha
    );
    println!(
        "  • Initial State: q1={}, q2={}",
        config.initial.q1, config.initial.q2
    );
    println!("  • Precision: {}", config.search.precision);

    let search = CriticalSearch::with_config(config.model, config.initial, config.search_config())
        .context("Invalid search parameters")?;
    let result = search.run();
    print_critical(&result);

    if let Some(samples) = config.search.monotonicity_samples {
        let report = search.monotonicity(&result, samples);
        print_monotonicity(&report);
    }
    Ok(())
}

use anyhow::{Context, Result};
use demedrive_sim::simulation::Configuration;
use std::path::Path;

use crate::printing::print_parameters;

pub fn write_configuration(config: &Configuration, output: &Path, force: bool) -> Result<()> {
    println!("🧬 demedrive - Initializing Configuration");
    println!("============================================");

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    config
        .validate()
        .context("Invalid configuration parameters")?;
    config
        .write_json_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_parameters(config);
    println!("✓ Configuration written to: {}", output.display());
    println!("  Use it with: demedrive --config {} run", output.display());
    Ok(())
}

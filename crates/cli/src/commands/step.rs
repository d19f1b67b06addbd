use anyhow::{Context, Result};
use demedrive_sim::simulation::{step_checked, Configuration};

pub fn step_once(config: &Configuration) -> Result<()> {
    let next = step_checked(config.initial, &config.model)
        .context("Failed to advance one generation")?;

    println!("q1: {}", next.q1);
    println!("q2: {}", next.q2);
    Ok(())
}

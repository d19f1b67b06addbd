use anyhow::{Context, Result};
use demedrive_sim::base::Deme;
use demedrive_sim::simulation::{migrant_count, Configuration, GenotypeSampler};

pub fn draw(config: &Configuration) -> Result<()> {
    println!("🧬 demedrive - Display Sample");
    println!("============================================");

    config.initial.validate().context("Invalid initial state")?;
    let individuals = config.sampling.individuals;
    let mut sampler = GenotypeSampler::new(config.sampling.seed);
    let sample = sampler
        .sample_demes(config.initial, individuals)
        .context("Failed to sample genotypes")?;

    for deme in Deme::ALL {
        let counts = sample.counts(deme);
        let genotypes: Vec<&str> = sample.deme(deme).iter().map(|g| g.symbol()).collect();
        println!(
            "\n🐭 {} (q={})",
            deme,
            config.initial.get(deme)
        );
        println!(
            "  • AA: {}, Aa: {}, aa: {}",
            counts.drive_homozygotes, counts.heterozygotes, counts.wild_type
        );
        println!("  • {}", genotypes.join(" "));
    }

    println!(
        "\n  • Migrants per tick: {} each way (m={})",
        migrant_count(config.model.m, individuals),
        config.model.m
    );
    Ok(())
}

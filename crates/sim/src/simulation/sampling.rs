//! Finite genotype samples for display.
//!
//! The recurrence tracks allele frequencies only. A front end that draws
//! individuals needs concrete genotypes, so this module draws a fixed number
//! of individuals per deme from the Hardy-Weinberg proportions of the current
//! frequency. Samples never feed back into the recurrence.
//!
//! - Genotype counts are a multinomial draw, built from sequential binomials.
//! - Migrants per tick are `round(m * n)`, rounding half to even.
//! - Seeded samplers are reproducible; unseeded ones draw a seed from the
//!   thread RNG.

use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::base::{hardy_weinberg, AlleleState, Deme, Genotype, GenotypeCounts};
use crate::errors::SamplingError;

/// Individuals drawn per deme by the interactive front end.
pub const DEFAULT_INDIVIDUALS: usize = 20;

/// Number of individuals exchanged in each direction per tick.
#[inline]
pub fn migrant_count(m: f64, individuals: usize) -> usize {
    let migrants = (m * individuals as f64).round_ties_even();
    if migrants <= 0.0 {
        0
    } else {
        (migrants as usize).min(individuals)
    }
}

/// Display sample of both demes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemeSample {
    /// Individuals of the target deme, in random order
    pub target: Vec<Genotype>,
    /// Individuals of the non-target deme, in random order
    pub non_target: Vec<Genotype>,
}

impl DemeSample {
    /// Individuals of one deme.
    pub fn deme(&self, deme: Deme) -> &[Genotype] {
        match deme {
            Deme::Target => &self.target,
            Deme::NonTarget => &self.non_target,
        }
    }

    /// Genotype counts of one deme.
    pub fn counts(&self, deme: Deme) -> GenotypeCounts {
        self.deme(deme)
            .iter()
            .fold(GenotypeCounts::default(), |mut counts, genotype| {
                match genotype {
                    Genotype::DriveHomozygote => counts.drive_homozygotes += 1,
                    Genotype::Heterozygote => counts.heterozygotes += 1,
                    Genotype::WildType => counts.wild_type += 1,
                }
                counts
            })
    }
}

/// Draws display genotypes from allele frequencies.
#[derive(Debug, Clone)]
pub struct GenotypeSampler {
    rng: Xoshiro256PlusPlus,
}

impl GenotypeSampler {
    /// Create a sampler, seeded for reproducibility or from the thread RNG.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            Xoshiro256PlusPlus::seed_from_u64(seed)
        } else {
            Xoshiro256PlusPlus::from_seed(rand::rng().random())
        };
        Self { rng }
    }

    /// Multinomial draw of `individuals` over the Hardy-Weinberg proportions
    /// of `q`.
    pub fn sample_counts(
        &mut self,
        q: f64,
        individuals: usize,
    ) -> Result<GenotypeCounts, SamplingError> {
        if !(0.0..=1.0).contains(&q) {
            return Err(SamplingError::InvalidFrequency(q));
        }
        let [p_drive, p_het, _] = hardy_weinberg(q);
        let n = individuals as u64;

        let drive_homozygotes = self.binomial(n, p_drive)?;
        let remaining = n - drive_homozygotes;
        // Conditional probability of a heterozygote among the rest
        let rest = 1.0 - p_drive;
        let p_het_given_rest = if rest > 0.0 { p_het / rest } else { 0.0 };
        let heterozygotes = self.binomial(remaining, p_het_given_rest)?;

        Ok(GenotypeCounts::new(
            drive_homozygotes,
            heterozygotes,
            remaining - heterozygotes,
        ))
    }

    /// Draw `individuals` genotypes at frequency `q`, in random order.
    pub fn sample_genotypes(
        &mut self,
        q: f64,
        individuals: usize,
    ) -> Result<Vec<Genotype>, SamplingError> {
        let counts = self.sample_counts(q, individuals)?;
        let mut genotypes = Vec::with_capacity(individuals);
        for genotype in Genotype::ALL {
            genotypes.extend(std::iter::repeat(genotype).take(counts.get(genotype) as usize));
        }
        genotypes.shuffle(&mut self.rng);
        Ok(genotypes)
    }

    /// Draw `individuals` genotypes for each deme of `state`.
    pub fn sample_demes(
        &mut self,
        state: AlleleState,
        individuals: usize,
    ) -> Result<DemeSample, SamplingError> {
        Ok(DemeSample {
            target: self.sample_genotypes(state.q1, individuals)?,
            non_target: self.sample_genotypes(state.q2, individuals)?,
        })
    }

    /// Pick which individuals of a deme migrate this tick.
    ///
    /// Returns `count` distinct indices into a deme of `individuals`.
    pub fn choose_migrants(
        &mut self,
        individuals: usize,
        count: usize,
    ) -> Result<Vec<usize>, SamplingError> {
        if count > individuals {
            return Err(SamplingError::TooManyMigrants {
                migrants: count,
                individuals,
            });
        }
        Ok(index::sample(&mut self.rng, individuals, count).into_vec())
    }

    fn binomial(&mut self, n: u64, p: f64) -> Result<u64, SamplingError> {
        let dist = Binomial::new(n, p.clamp(0.0, 1.0))
            .map_err(|e| SamplingError::Distribution(e.to_string()))?;
        Ok(dist.sample(&mut self.rng))
    }
}
